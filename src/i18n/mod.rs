// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Translation files embedded in the binary
//! - Message arguments (`{ $reason }`, `{ $current }`, ...)
//! - Fallback to `en-US` when a locale is unavailable

pub mod fluent;
