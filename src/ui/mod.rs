// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! Follows the Elm-style "state down, messages up" pattern: the
//! [`studio`] panels render from a borrowed view context and report
//! interactions as messages.
//!
//! - [`studio`] - Upload, prompt and style, generate button, history sidebar
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod studio;
pub mod styles;
pub mod theming;
pub mod widgets;
