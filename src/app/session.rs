// SPDX-License-Identifier: MPL-2.0
//! Per-session state that is never persisted.

use crate::error::{Error, GenerationError};
use crate::i18n::fluent::I18n;
use crate::media::{Preview, SourceFile};
use iced::widget::image;

/// The image the next generate request will use.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// `None` when the image was restored from history.
    pub source: Option<SourceFile>,
    pub preview: Preview,
    /// Decoded handle for display, when available.
    pub display: Option<image::Handle>,
}

#[derive(Debug, Clone, Default)]
pub enum Upload {
    #[default]
    Empty,
    /// A picked file is being preprocessed. `ticket` tags the pending result.
    Processing { ticket: u64 },
    Ready(SelectedImage),
}

impl Upload {
    #[must_use]
    pub fn selected(&self) -> Option<&SelectedImage> {
        match self {
            Upload::Ready(selected) => Some(selected),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self, Upload::Processing { .. })
    }
}

/// Content of the error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    /// A rejected or unprocessable file, or a generate without inputs.
    Input(Error),
    Generation(GenerationError),
    /// An i18n key for a startup notice such as an unreadable config.
    Notice(String),
}

impl Banner {
    #[must_use]
    pub fn localize(&self, i18n: &I18n) -> String {
        match self {
            Banner::Input(err) => i18n.tr(err.i18n_key()),
            Banner::Generation(err) => {
                let reason = err.reason();
                i18n.tr_with_args(err.i18n_key(), &[("reason", reason.as_str())])
            }
            Banner::Notice(key) => i18n.tr(key),
        }
    }
}
