// SPDX-License-Identifier: MPL-2.0
//! Sidebar listing the most recent generations.

use super::format::{format_created_at, style_caption};
use super::{Message, ViewContext};
use crate::domain::generation::GenerationRecord;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, image, Column, Container, Row, Scrollable, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Decode state of a history thumbnail.
#[derive(Debug, Clone, Default)]
pub enum Thumbnail {
    #[default]
    Loading,
    Ready(image::Handle),
    Failed,
}

impl Thumbnail {
    /// True until the decode result arrives.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Thumbnail::Loading)
    }
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("history-title")).size(typography::TITLE_SM);

    let body: Element<'a, Message> = if ctx.history.is_empty() {
        Text::new(ctx.i18n.tr("history-empty"))
            .size(typography::BODY_SM)
            .color(ctx.colors.text_secondary)
            .into()
    } else {
        let entries = ctx
            .history
            .iter()
            .fold(Column::new().spacing(spacing::SM), |column, record| {
                column.push(entry(ctx, record))
            });
        Scrollable::new(entries).height(Length::Fill).into()
    };

    Container::new(Column::new().spacing(spacing::MD).push(title).push(body))
        .padding(spacing::LG)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(styles::container::panel)
        .into()
}

fn entry<'a>(ctx: &ViewContext<'a>, record: &'a GenerationRecord) -> Element<'a, Message> {
    let thumbnail = thumbnail(ctx, ctx.thumbnails.get(record.id()));

    let date_pattern = ctx.i18n.tr("history-date-format");
    let details = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(Text::new(record.prompt()).size(typography::BODY))
        .push(
            Text::new(style_caption(ctx.i18n, record.style()))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        )
        .push(
            Text::new(format_created_at(record.created_at(), &date_pattern))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        );

    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(thumbnail)
        .push(details);

    button(content)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(styles::button::history_entry)
        .on_press(Message::RestoreFromHistory(record.id().clone()))
        .into()
}

fn thumbnail<'a>(ctx: &ViewContext<'a>, state: Option<&Thumbnail>) -> Element<'a, Message> {
    let edge = Length::Fixed(sizing::HISTORY_THUMBNAIL);

    match state {
        Some(Thumbnail::Ready(handle)) => image(handle.clone())
            .width(edge)
            .height(edge)
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Thumbnail::Failed) => Container::new(
            Text::new(ctx.i18n.tr("history-image-fallback"))
                .size(typography::CAPTION)
                .align_x(alignment::Horizontal::Center),
        )
        .width(edge)
        .height(edge)
        .center_x(edge)
        .center_y(edge)
        .style(styles::container::thumbnail_placeholder)
        .into(),
        Some(Thumbnail::Loading) => Container::new(
            AnimatedSpinner::new(ctx.colors.brand_primary, ctx.spinner_rotation)
                .with_size(sizing::ICON_MD)
                .into_element(),
        )
        .width(edge)
        .height(edge)
        .center_x(edge)
        .center_y(edge)
        .style(styles::container::thumbnail_placeholder)
        .into(),
        None => Container::new(Text::new(""))
            .width(edge)
            .height(edge)
            .style(styles::container::thumbnail_placeholder)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_thumbnails_start_loading() {
        assert!(Thumbnail::default().is_loading());
    }

    #[test]
    fn decode_results_end_loading() {
        let handle = image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        assert!(!Thumbnail::Ready(handle).is_loading());
        assert!(!Thumbnail::Failed.is_loading());
    }
}
