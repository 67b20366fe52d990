// SPDX-License-Identifier: MPL-2.0
//! The studio screen: upload, prompt and style, generate, and history.
//!
//! Panels are pure functions of a borrowed [`ViewContext`] and emit
//! [`Message`]s that the application maps into its own message type.

pub mod format;
pub mod history;
pub mod prompt;
pub mod upload;

pub use history::Thumbnail;

use crate::domain::generation::{GenerationId, GenerationRecord, StyleTag};
use crate::i18n::fluent::I18n;
use crate::media::SourceFile;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use iced::widget::{image, Column, Container, Row, Scrollable, Text};
use iced::{alignment, Element, Length};
use std::collections::HashMap;

/// User interactions on the studio screen.
#[derive(Debug, Clone)]
pub enum Message {
    OpenFileDialog,
    ClearFile,
    PromptChanged(String),
    StyleSelected(StyleTag),
    /// Generate button or Enter in the prompt field.
    Generate,
    /// The generate button pressed while a request is in flight.
    Cancel,
    RestoreFromHistory(GenerationId),
}

/// What the upload panel shows.
#[derive(Debug, Clone, Copy)]
pub enum UploadView<'a> {
    Empty,
    Processing,
    Ready {
        /// `None` when the image was restored from history.
        source: Option<&'a SourceFile>,
        /// `None` while a restored image has no decoded thumbnail.
        handle: Option<&'a image::Handle>,
    },
}

/// State of the generate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateState {
    /// `ready` is true when a preview exists and the prompt is not blank.
    Idle { ready: bool },
    Requesting { retry_count: u32, max_attempts: u32 },
}

impl GenerateState {
    #[must_use]
    pub fn is_requesting(self) -> bool {
        matches!(self, GenerateState::Requesting { .. })
    }
}

/// Everything the studio screen reads to render one frame.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub colors: ColorScheme,
    pub upload: UploadView<'a>,
    pub prompt: &'a str,
    pub style: &'a StyleTag,
    pub generate: GenerateState,
    /// Localized error banner text.
    pub error: Option<String>,
    pub history: &'a [GenerationRecord],
    pub thumbnails: &'a HashMap<GenerationId, Thumbnail>,
    pub spinner_rotation: f32,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(Text::new(ctx.i18n.tr("app-heading")).size(typography::TITLE_LG))
        .push(
            Text::new(ctx.i18n.tr("app-subtitle"))
                .size(typography::BODY)
                .color(ctx.colors.text_secondary),
        );

    let main_column = Column::new()
        .spacing(spacing::LG)
        .width(Length::Fill)
        .push(upload::view(&ctx))
        .push(prompt::view(&ctx));

    let body = Row::new()
        .spacing(spacing::LG)
        .height(Length::Fill)
        .push(
            Scrollable::new(main_column)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(history::view(&ctx));

    let mut page = Column::new()
        .spacing(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .push(header);

    if let Some(message) = ctx.error.clone() {
        page = page.push(
            Container::new(Text::new(message).size(typography::BODY))
                .padding(spacing::SM)
                .width(Length::Fill)
                .style(styles::container::error_banner),
        );
    }

    page = page.push(body);

    Container::new(page)
        .padding(spacing::XL)
        .center_x(Length::Fill)
        .height(Length::Fill)
        .into()
}
