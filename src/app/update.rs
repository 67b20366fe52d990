// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Each handler borrows exactly the session fields it touches through
//! [`UpdateContext`] and returns the follow-up [`Task`].

use super::history::History;
use super::session::{Banner, SelectedImage, Upload};
use super::Message;
use crate::application::controller::{self, GenerationController, Progress, RequestTicket};
use crate::application::port::GenerationService;
use crate::domain::generation::{GenerationId, StyleTag};
use crate::error::{Error, Result};
use crate::media::{self, data_url, stylize, Preview, SourceFile};
use crate::ui::studio::{self, Thumbnail};
use crate::ui::widgets::animated_spinner;
use iced::Task;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Extensions offered by the open dialog.
const DIALOG_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub struct UpdateContext<'a> {
    pub upload: &'a mut Upload,
    pub upload_ticket: &'a mut u64,
    pub prompt: &'a mut String,
    pub style: &'a mut StyleTag,
    pub controller: &'a mut GenerationController,
    pub service: &'a Arc<dyn GenerationService>,
    pub history: &'a mut History,
    pub thumbnails: &'a mut HashMap<GenerationId, Thumbnail>,
    pub banner: &'a mut Option<Banner>,
    pub spinner_rotation: &'a mut f32,
    pub data_dir: Option<PathBuf>,
    pub dialog_filter_name: String,
}

pub fn handle_studio_message(ctx: &mut UpdateContext<'_>, message: studio::Message) -> Task<Message> {
    match message {
        studio::Message::OpenFileDialog => {
            if ctx.upload.is_processing() {
                return Task::none();
            }
            handle_open_file_dialog(ctx.dialog_filter_name.clone())
        }
        studio::Message::ClearFile => {
            *ctx.upload = Upload::Empty;
            Task::none()
        }
        studio::Message::PromptChanged(prompt) => {
            *ctx.prompt = prompt;
            Task::none()
        }
        studio::Message::StyleSelected(style) => {
            *ctx.style = style;
            Task::none()
        }
        studio::Message::Generate => start_generation(ctx),
        studio::Message::Cancel => {
            ctx.controller.cancel();
            Task::none()
        }
        studio::Message::RestoreFromHistory(id) => {
            restore_from_history(ctx, &id);
            Task::none()
        }
    }
}

/// Handles the open file dialog request.
pub fn handle_open_file_dialog(filter_name: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter(filter_name, &DIALOG_EXTENSIONS[..])
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Validates `path` and starts preprocessing it.
///
/// Ignored while another file is being processed. A rejected file leaves the
/// current selection untouched and shows the reason in the banner.
pub fn handle_file_selected(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    if ctx.upload.is_processing() {
        log::debug!("Ignoring {} while another file is processing", path.display());
        return Task::none();
    }

    let source = match SourceFile::inspect(&path) {
        Ok(source) => source,
        Err(err) => {
            log::info!("Rejected {}: {err}", path.display());
            *ctx.banner = Some(Banner::Input(err));
            return Task::none();
        }
    };

    *ctx.banner = None;
    *ctx.upload_ticket += 1;
    let ticket = *ctx.upload_ticket;
    *ctx.upload = Upload::Processing { ticket };

    Task::perform(load_selection(source), move |result| Message::PreviewReady {
        ticket,
        result,
    })
}

async fn load_selection(source: SourceFile) -> Result<SelectedImage> {
    let preview = media::preprocess::preprocess(source.clone()).await?;
    let display = media::image::load_data_url(preview.data_url.clone()).await?;
    Ok(SelectedImage {
        source: Some(source),
        preview,
        display: Some(display.handle),
    })
}

pub fn handle_preview_ready(
    ctx: &mut UpdateContext<'_>,
    ticket: u64,
    result: Result<SelectedImage>,
) -> Task<Message> {
    if !matches!(*ctx.upload, Upload::Processing { ticket: pending } if pending == ticket) {
        log::debug!("Dropping stale preview {ticket}");
        return Task::none();
    }

    match result {
        Ok(selected) => *ctx.upload = Upload::Ready(selected),
        Err(err) => {
            log::warn!("Image preprocessing failed: {err}");
            *ctx.upload = Upload::Empty;
            *ctx.banner = Some(Banner::Input(err));
        }
    }
    Task::none()
}

fn start_generation(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let preview = ctx
        .upload
        .selected()
        .map(|selected| selected.preview.data_url.as_str());

    match ctx.controller.begin(preview, ctx.prompt, ctx.style.clone()) {
        Ok(handle) => {
            *ctx.banner = None;
            let ticket = handle.ticket;
            let policy = ctx.controller.policy();
            Task::stream(controller::drive(Arc::clone(ctx.service), policy, handle))
                .map(move |progress| Message::Generation { ticket, progress })
        }
        Err(err) => {
            *ctx.banner = Some(Banner::Input(err.into()));
            Task::none()
        }
    }
}

pub fn handle_generation_progress(
    ctx: &mut UpdateContext<'_>,
    ticket: RequestTicket,
    progress: Progress,
) -> Task<Message> {
    let Some(progress) = ctx.controller.observe(ticket, progress) else {
        return Task::none();
    };

    match progress {
        Progress::Retrying { .. } | Progress::Cancelled => Task::none(),
        Progress::Failed(err) => {
            *ctx.banner = Some(Banner::Generation(err));
            Task::none()
        }
        Progress::Succeeded(record) => {
            let id = record.id().clone();
            let image_url = record.image_url().to_owned();

            ctx.history.prepend(record);
            if let Err(err) = ctx.history.save_to(ctx.data_dir.clone()) {
                log::error!("Failed to save generation history: {err}");
            }

            let history = &*ctx.history;
            ctx.thumbnails.retain(|kept, _| history.get(kept).is_some());
            ctx.thumbnails.insert(id.clone(), Thumbnail::Loading);
            load_thumbnail(id, image_url)
        }
    }
}

/// Decodes the render of history entry `id` off the UI thread.
pub fn load_thumbnail(id: GenerationId, image_url: String) -> Task<Message> {
    Task::perform(media::image::load_data_url(image_url), move |result| {
        Message::ThumbnailLoaded {
            id,
            result: result.map(|data| data.handle),
        }
    })
}

pub fn handle_thumbnail_loaded(
    ctx: &mut UpdateContext<'_>,
    id: &GenerationId,
    result: std::result::Result<iced::widget::image::Handle, Error>,
) {
    let Some(thumbnail) = ctx.thumbnails.get_mut(id) else {
        return;
    };
    *thumbnail = match result {
        Ok(handle) => Thumbnail::Ready(handle),
        Err(err) => {
            log::warn!("Thumbnail for {id} could not be decoded: {err}");
            Thumbnail::Failed
        }
    };
}

/// Republishes the prompt, style and render stored with `id`.
fn restore_from_history(ctx: &mut UpdateContext<'_>, id: &GenerationId) {
    let Some(restored) = ctx.history.restore(id) else {
        return;
    };

    let display = match ctx.thumbnails.get(id) {
        Some(Thumbnail::Ready(handle)) => Some(handle.clone()),
        _ => restored_display(&restored.image_url),
    };

    *ctx.prompt = restored.prompt;
    *ctx.style = restored.style;
    *ctx.upload = Upload::Ready(SelectedImage {
        source: None,
        preview: Preview {
            data_url: restored.image_url,
            width: stylize::OUTPUT_SIZE,
            height: stylize::OUTPUT_SIZE,
        },
        display,
    });
}

/// Builds a handle from the encoded render when no decoded thumbnail is
/// available yet. The renderer decodes it lazily.
fn restored_display(image_url: &str) -> Option<iced::widget::image::Handle> {
    match data_url::decode_bytes(image_url) {
        Ok(bytes) => Some(iced::widget::image::Handle::from_bytes(bytes)),
        Err(err) => {
            log::warn!("Restored render could not be read: {err}");
            None
        }
    }
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>) {
    *ctx.spinner_rotation = animated_spinner::advance(*ctx.spinner_rotation);
}
