// SPDX-License-Identifier: MPL-2.0
//! Raster work for the studio: upload preprocessing, style rendering and
//! data URL encoding.
//!
//! Everything here is synchronous and CPU bound except the thin async
//! wrappers, which move the work onto tokio's blocking pool.

pub mod color_filter;
pub mod data_url;
pub mod image;
pub mod preprocess;
pub mod stylize;

pub use image::ImageData;
pub use preprocess::{Preview, SourceFile};
