// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::session::SelectedImage;
use crate::application::controller::{Progress, RequestTicket};
use crate::domain::generation::GenerationId;
use crate::error::Error;
use crate::ui::studio;
use iced::widget::image;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Studio(studio::Message),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Preprocessing of the picked file finished.
    PreviewReady {
        ticket: u64,
        result: Result<SelectedImage, Error>,
    },
    /// One update from a running generate request.
    Generation {
        ticket: RequestTicket,
        progress: Progress,
    },
    ThumbnailLoaded {
        id: GenerationId,
        result: Result<image::Handle, Error>,
    },
    /// Spinner animation tick while busy.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to preprocess on startup.
    pub file_path: Option<String>,
    /// Optional data directory (history file).
    /// Takes precedence over `--data-dir` and `ICED_STUDIO_DATA_DIR`.
    pub data_dir: Option<PathBuf>,
    /// Optional config directory (settings.toml).
    /// Takes precedence over `--config-dir` and `ICED_STUDIO_CONFIG_DIR`.
    pub config_dir: Option<PathBuf>,
}
