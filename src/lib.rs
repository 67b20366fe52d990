// SPDX-License-Identifier: MPL-2.0
//! `iced_studio` restyles an uploaded image with a preset and a prompt,
//! keeping a short history of past renders.
//!
//! The crate follows a layered layout: `domain` holds the generation types,
//! `application` the ports and the retrying request controller,
//! `infrastructure` the simulated backend, `media` the raster work, and
//! `app` with `ui` the Iced front end.

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
