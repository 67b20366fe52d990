// SPDX-License-Identifier: MPL-2.0
//! Generate request lifecycle: entry guard, bounded retries and cancellation.
//!
//! The work is split in two halves:
//!
//! - [`GenerationController`] is owned by the session and is its single
//!   writer. It validates inputs, mints a ticket and a cancellation token per
//!   request and filters every progress update through [`observe`].
//! - [`drive`] is the asynchronous side. It runs the attempts one after
//!   another against a [`GenerationService`] and yields [`Progress`] items,
//!   ending with exactly one terminal item.
//!
//! A result is only applied if [`observe`] accepts it, so an update that
//! arrives after a cancel or after a replacement request is dropped.
//!
//! [`observe`]: GenerationController::observe

use crate::application::port::{GenerationService, ServiceError};
use crate::domain::generation::{GenerationRecord, GenerationRequest, StyleTag};
use crate::error::{GenerationError, ValidationError};
use futures_util::stream::{self, Stream};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default number of attempts per request, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base of the exponential backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Bounded exponential retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt number `attempt` (1-based): `base * 2^attempt`.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Identifies one request so that late updates can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    /// `attempt` is 1-based and never exceeds the policy's `max_attempts`.
    Requesting { attempt: u32 },
}

/// Everything the driver needs to run one request.
#[derive(Debug, Clone)]
pub struct ActiveHandle {
    pub ticket: RequestTicket,
    pub token: CancellationToken,
    pub request: GenerationRequest,
}

/// Update yielded by [`drive`].
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Attempt `failed_attempt` was overloaded; a backoff has started.
    Retrying { failed_attempt: u32 },
    Succeeded(GenerationRecord),
    Failed(GenerationError),
    Cancelled,
}

impl Progress {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Progress::Retrying { .. })
    }
}

#[derive(Debug)]
struct Active {
    ticket: RequestTicket,
    token: CancellationToken,
}

/// Session-side state machine for generate requests.
#[derive(Debug, Default)]
pub struct GenerationController {
    policy: RetryPolicy,
    state: ControllerState,
    retry_count: u32,
    next_ticket: u64,
    active: Option<Active>,
}

impl GenerationController {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Starts a request.
    ///
    /// A preview must be present and the prompt must contain non-whitespace
    /// text. The request carries the trimmed prompt. A request that is still
    /// in flight is cancelled and replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingInput`] without any state change
    /// when the guard fails.
    pub fn begin(
        &mut self,
        preview: Option<&str>,
        prompt: &str,
        style: StyleTag,
    ) -> Result<ActiveHandle, ValidationError> {
        let prompt = prompt.trim();
        let Some(preview) = preview.filter(|_| !prompt.is_empty()) else {
            return Err(ValidationError::MissingInput);
        };

        if let Some(previous) = self.active.take() {
            log::warn!("Replacing in-flight generation request");
            previous.token.cancel();
        }

        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        let token = CancellationToken::new();

        self.active = Some(Active {
            ticket,
            token: token.clone(),
        });
        self.state = ControllerState::Requesting { attempt: 1 };
        self.retry_count = 0;

        log::info!("Generation started (style: {style})");

        Ok(ActiveHandle {
            ticket,
            token,
            request: GenerationRequest::new(preview, prompt, style),
        })
    }

    /// Cancels the in-flight request, if any, and returns to idle at once.
    ///
    /// Returns `true` if a request was cancelled.
    pub fn cancel(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        active.token.cancel();
        self.state = ControllerState::Idle;
        self.retry_count = 0;
        log::info!("Generation cancelled");
        true
    }

    /// Filters a progress update from the driver.
    ///
    /// Returns the update if it belongs to the current request and that
    /// request has not been cancelled; the caller must only act on `Some`.
    pub fn observe(&mut self, ticket: RequestTicket, progress: Progress) -> Option<Progress> {
        let active = self.active.as_ref()?;
        if active.ticket != ticket || active.token.is_cancelled() {
            return None;
        }

        match &progress {
            Progress::Retrying { failed_attempt } => {
                self.retry_count = *failed_attempt;
                self.state = ControllerState::Requesting {
                    attempt: (failed_attempt + 1).min(self.policy.max_attempts),
                };
            }
            _ => {
                self.active = None;
                self.state = ControllerState::Idle;
                self.retry_count = 0;
            }
        }

        Some(progress)
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Number of failed attempts in the current request.
    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn is_requesting(&self) -> bool {
        matches!(self.state, ControllerState::Requesting { .. })
    }

    /// Ticket of the request in flight.
    #[must_use]
    pub fn active_ticket(&self) -> Option<RequestTicket> {
        self.active.as_ref().map(|active| active.ticket)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

enum Step {
    Attempt(u32),
    Backoff(u32),
    Finished,
}

struct Driver {
    service: Arc<dyn GenerationService>,
    policy: RetryPolicy,
    handle: ActiveHandle,
    step: Step,
}

/// Runs the attempts of one request and yields its progress.
///
/// The stream ends right after its single terminal item.
pub fn drive(
    service: Arc<dyn GenerationService>,
    policy: RetryPolicy,
    handle: ActiveHandle,
) -> impl Stream<Item = Progress> + Send + 'static {
    let driver = Driver {
        service,
        policy,
        handle,
        step: Step::Attempt(1),
    };

    stream::unfold(driver, |mut driver| async move {
        loop {
            match driver.step {
                Step::Finished => return None,
                Step::Backoff(failed) => {
                    let delay = driver.policy.backoff_for(failed);
                    tokio::select! {
                        biased;
                        () = driver.handle.token.cancelled() => {
                            driver.step = Step::Finished;
                            return Some((Progress::Cancelled, driver));
                        }
                        () = tokio::time::sleep(delay) => {}
                    }
                    driver.step = Step::Attempt(failed + 1);
                }
                Step::Attempt(attempt) => {
                    let progress = run_attempt(&driver, attempt).await;
                    driver.step = match progress {
                        Progress::Retrying { failed_attempt } => Step::Backoff(failed_attempt),
                        _ => Step::Finished,
                    };
                    return Some((progress, driver));
                }
            }
        }
    })
}

async fn run_attempt(driver: &Driver, attempt: u32) -> Progress {
    let token = &driver.handle.token;
    if token.is_cancelled() {
        return Progress::Cancelled;
    }

    match driver.service.generate(&driver.handle.request, token).await {
        Ok(record) => {
            log::info!("Generation {} succeeded on attempt {attempt}", record.id());
            Progress::Succeeded(record)
        }
        Err(ServiceError::Cancelled) => Progress::Cancelled,
        Err(err) if err.is_retryable() && attempt < driver.policy.max_attempts => {
            log::info!(
                "Attempt {attempt}/{} failed ({err}), retrying",
                driver.policy.max_attempts
            );
            Progress::Retrying {
                failed_attempt: attempt,
            }
        }
        Err(err) => {
            log::warn!("Generation failed after {attempt} attempt(s): {err}");
            Progress::Failed(match err {
                ServiceError::Decode(msg) => GenerationError::Decode(msg),
                ServiceError::TransientOverload => GenerationError::Overloaded,
                ServiceError::Cancelled => {
                    GenerationError::Other(ServiceError::Cancelled.reason())
                }
            })
        }
    }
}
