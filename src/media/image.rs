// SPDX-License-Identifier: MPL-2.0
//! Decoding data URLs into display handles for the preview and history.

use super::data_url;
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Decodes a base64 data URL into a display handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the URL or its payload is malformed.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let decoded = data_url::decode(url)?;
        let (width, height) = decoded.dimensions();
        Ok(Self::from_rgba(width, height, decoded.to_rgba8().into_vec()))
    }
}

/// Decodes a data URL off the UI thread.
pub async fn load_data_url(url: String) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || ImageData::from_data_url(&url))
        .await
        .map_err(|e| Error::Decode(e.to_string()))?
}
