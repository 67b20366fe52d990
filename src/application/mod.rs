// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`controller`]: The generate request state machine and its retry driver
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives the controller and renders its state
//!
//! # Example
//!
//! ```ignore
//! use iced_studio::application::controller::{drive, GenerationController, RetryPolicy};
//!
//! let mut controller = GenerationController::new(RetryPolicy::default());
//! let handle = controller.begin(Some(preview), "a red coat", style)?;
//! let updates = drive(service, controller.policy(), handle);
//! ```

pub mod controller;
pub mod port;
