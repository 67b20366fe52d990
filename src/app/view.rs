// SPDX-License-Identifier: MPL-2.0
//! Builds the studio view context from the session state.

use super::session::Upload;
use super::{App, Message};
use crate::ui::studio::{self, GenerateState, UploadView};
use crate::ui::theming::ColorScheme;
use iced::Element;

pub fn view(app: &App) -> Element<'_, Message> {
    let upload = match &app.upload {
        Upload::Empty => UploadView::Empty,
        Upload::Processing { .. } => UploadView::Processing,
        Upload::Ready(selected) => UploadView::Ready {
            source: selected.source.as_ref(),
            handle: selected.display.as_ref(),
        },
    };

    studio::view(studio::ViewContext {
        i18n: &app.i18n,
        colors: ColorScheme::for_mode(app.theme_mode),
        upload,
        prompt: &app.prompt,
        style: &app.style,
        generate: generate_state(app),
        error: app.banner.as_ref().map(|banner| banner.localize(&app.i18n)),
        history: app.history.entries(),
        thumbnails: &app.thumbnails,
        spinner_rotation: app.spinner_rotation,
    })
    .map(Message::Studio)
}

pub(super) fn generate_state(app: &App) -> GenerateState {
    if app.controller.is_requesting() {
        GenerateState::Requesting {
            retry_count: app.controller.retry_count(),
            max_attempts: app.controller.max_attempts(),
        }
    } else {
        GenerateState::Idle {
            ready: app.upload.selected().is_some() && !app.prompt.trim().is_empty(),
        }
    }
}
