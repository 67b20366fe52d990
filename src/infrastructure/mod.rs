// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`mock_generation`]: Simulated generation backend (implements [`GenerationService`])
//!
//! [`GenerationService`]: crate::application::port::GenerationService

pub mod mock_generation;

pub use mock_generation::{Gate, GateOutcome, MockGenerationService, RandomGate, Verdict};
