// SPDX-License-Identifier: MPL-2.0
//! Generation backend port definition.
//!
//! A backend turns a [`GenerationRequest`] into a finished
//! [`GenerationRecord`]. It owns no session state; the controller decides
//! whether a failure is retried and whether a result is still wanted.

use crate::domain::generation::{GenerationRecord, GenerationRequest};
use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;

// =============================================================================
// ServiceError
// =============================================================================

/// Failures a single generation attempt can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request's token fired before the result was produced.
    Cancelled,

    /// The backend is temporarily overloaded; another attempt may succeed.
    TransientOverload,

    /// The preview could not be decoded (or the result not encoded).
    Decode(String),
}

impl ServiceError {
    /// Returns `true` if the controller should schedule another attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::TransientOverload)
    }

    /// Human-readable reason, as shown after "Generation failed:".
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Cancelled => write!(f, "Request aborted"),
            ServiceError::TransientOverload => write!(f, "Model overloaded"),
            ServiceError::Decode(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

// =============================================================================
// GenerationService Trait
// =============================================================================

/// Port for a styled-image generation backend.
///
/// Implementations must observe `cancel` at least once after any simulated or
/// real wait, and return [`ServiceError::Cancelled`] if it fired.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Runs a single generation attempt.
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationRecord, ServiceError>;
}
