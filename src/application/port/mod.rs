// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`generation`]: The styled-image generation backend
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles, no raster types)
//! - Traits are `Send + Sync` so they can be shared by in-flight tasks

pub mod generation;

pub use generation::{GenerationService, ServiceError};
