// SPDX-License-Identifier: MPL-2.0
//! In-process stand-in for a remote image generation model.
//!
//! Each call waits for a simulated network latency, may report a transient
//! overload, and otherwise renders the preview locally with the requested
//! style. The random parts are behind [`Gate`] so tests can script them.

use crate::application::port::{GenerationService, ServiceError};
use crate::domain::generation::{GenerationId, GenerationRecord, GenerationRequest};
use crate::error::Error;
use crate::media::stylize;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default latency window of a simulated call, in milliseconds.
pub const DEFAULT_LATENCY_MS: (u64, u64) = (1000, 2000);

/// Default probability that a simulated call reports an overload.
pub const DEFAULT_FAILURE_RATE: f64 = 0.2;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Overloaded,
}

/// Latency and verdict drawn for one simulated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    pub latency: Duration,
    pub verdict: Verdict,
}

/// Source of the non-deterministic parts of a call.
pub trait Gate: Send + Sync {
    fn roll(&self) -> GateOutcome;
}

/// Gate backed by a seedable pseudo-random generator.
#[derive(Debug)]
pub struct RandomGate {
    rng: Mutex<StdRng>,
    latency_ms: (u64, u64),
    failure_rate: f64,
}

impl RandomGate {
    /// Creates a gate drawing latencies uniformly from
    /// `[latency_ms.0, latency_ms.1)` and failing with `failure_rate`.
    ///
    /// Without a `seed` the generator is seeded from OS entropy.
    #[must_use]
    pub fn new(latency_ms: (u64, u64), failure_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (min, max) = latency_ms;
        Self {
            rng: Mutex::new(rng),
            latency_ms: (min, max.max(min)),
            failure_rate: if failure_rate.is_finite() {
                failure_rate.clamp(0.0, 1.0)
            } else {
                DEFAULT_FAILURE_RATE
            },
        }
    }
}

impl Default for RandomGate {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_MS, DEFAULT_FAILURE_RATE, None)
    }
}

impl Gate for RandomGate {
    fn roll(&self) -> GateOutcome {
        // A panic elsewhere cannot leave an RNG in a broken state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let (min, max) = self.latency_ms;
        let latency = if min < max {
            rng.random_range(min..max)
        } else {
            min
        };
        let verdict = if rng.random_bool(self.failure_rate) {
            Verdict::Overloaded
        } else {
            Verdict::Pass
        };
        GateOutcome {
            latency: Duration::from_millis(latency),
            verdict,
        }
    }
}

/// Mock generation backend.
#[derive(Debug, Default)]
pub struct MockGenerationService<G: Gate = RandomGate> {
    gate: G,
}

impl<G: Gate> MockGenerationService<G> {
    #[must_use]
    pub fn new(gate: G) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl<G: Gate + 'static> GenerationService for MockGenerationService<G> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationRecord, ServiceError> {
        let outcome = self.gate.roll();
        tokio::time::sleep(outcome.latency).await;

        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        if outcome.verdict == Verdict::Overloaded {
            return Err(ServiceError::TransientOverload);
        }

        let source = request.preview().to_owned();
        let style = request.style().style();
        let image_url = tokio::task::spawn_blocking(move || stylize::render(&source, style))
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))?
            .map_err(|e| match e {
                Error::Decode(msg) | Error::Encode(msg) | Error::Io(msg) => {
                    ServiceError::Decode(msg)
                }
                other => ServiceError::Decode(other.to_string()),
            })?;

        Ok(GenerationRecord::new(
            new_generation_id(),
            image_url,
            request.prompt(),
            request.style().clone(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    }
}

/// Mints an id of the form `gen_<unix millis>_<9 base36 chars>`.
#[must_use]
pub fn new_generation_id() -> GenerationId {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    GenerationId::new(format!("gen_{}_{suffix}", Utc::now().timestamp_millis()))
}
