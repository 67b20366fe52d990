// SPDX-License-Identifier: MPL-2.0
//! Generation domain types.
//!
//! A generation is one styled image produced from a preview, a prompt and a
//! style tag. Records are immutable once minted.

mod record;
mod style;

pub use record::{GenerationId, GenerationRecord, GenerationRequest};
pub use style::{Style, StyleTag};
