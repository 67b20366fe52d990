// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Generation**: Simulated backend latency and failure rate
//! - **Style**: Style preselected in a fresh session

// ==========================================================================
// Generation Defaults
// ==========================================================================

/// Lower bound of the simulated latency (inclusive), in milliseconds.
pub const DEFAULT_LATENCY_MIN_MS: u64 = 1000;

/// Upper bound of the simulated latency (exclusive), in milliseconds.
pub const DEFAULT_LATENCY_MAX_MS: u64 = 2000;

/// Ceiling accepted for either latency bound (one minute).
pub const MAX_LATENCY_MS: u64 = 60_000;

/// Probability that a simulated call reports an overload.
pub const DEFAULT_FAILURE_RATE: f64 = 0.2;

/// Minimum failure rate.
pub const MIN_FAILURE_RATE: f64 = 0.0;

/// Maximum failure rate.
pub const MAX_FAILURE_RATE: f64 = 1.0;

// ==========================================================================
// Style Defaults
// ==========================================================================

/// Tag of the style selected when the session starts.
pub const DEFAULT_STYLE_TAG: &str = "editorial";
