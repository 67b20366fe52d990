// SPDX-License-Identifier: MPL-2.0
//! Prompt input, style picker, live summary and the generate button.

use super::format::{style_caption, style_name};
use super::{GenerateState, Message, UploadView, ViewContext};
use crate::domain::generation::{Style, StyleTag};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, image, pick_list, text_input, Column, Container, Row, Text};
use iced::{alignment, Color, ContentFit, Element, Length, Theme};
use std::fmt;

/// Wrapper for a style tag to implement Display for pick_list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOption {
    pub tag: StyleTag,
    label: String,
}

impl fmt::Display for StyleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The five styles in display order, labelled in the current locale.
#[must_use]
pub fn style_options(i18n: &I18n) -> Vec<StyleOption> {
    Style::ALL
        .iter()
        .map(|style| {
            let tag = StyleTag::from(*style);
            StyleOption {
                label: style_name(i18n, &tag),
                tag,
            }
        })
        .collect()
}

/// Text of the generate button for the current request state.
#[must_use]
pub fn generate_label(i18n: &I18n, state: GenerateState) -> String {
    match state {
        GenerateState::Idle { .. } => i18n.tr("generate-button"),
        GenerateState::Requesting { retry_count: 0, .. } => i18n.tr("generate-in-progress"),
        GenerateState::Requesting {
            retry_count,
            max_attempts,
        } => i18n.tr_with_args(
            "generate-retrying",
            &[
                ("current", &retry_count.to_string()),
                ("max", &max_attempts.to_string()),
            ],
        ),
    }
}

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("prompt-title")).size(typography::TITLE_SM);

    let mut input = text_input(&ctx.i18n.tr("prompt-placeholder"), ctx.prompt)
        .on_input(Message::PromptChanged)
        .padding(spacing::SM)
        .size(typography::BODY_LG);
    if !ctx.generate.is_requesting() {
        input = input.on_submit(Message::Generate);
    }

    let prompt_field = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(ctx.i18n.tr("prompt-label")).size(typography::BODY))
        .push(input)
        .push(
            Text::new(ctx.i18n.tr("prompt-help"))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        );

    let options = style_options(ctx.i18n);
    let selected = options.iter().find(|option| &option.tag == ctx.style).cloned();
    let style_field = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(ctx.i18n.tr("style-label")).size(typography::BODY))
        .push(
            pick_list(options, selected, |option: StyleOption| {
                Message::StyleSelected(option.tag)
            })
            .width(Length::Fill)
            .padding(spacing::SM),
        );

    let mut content = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(prompt_field)
        .push(style_field);

    if let Some(summary) = summary(ctx) {
        content = content.push(summary);
    }

    content = content.push(generate_button(ctx));

    Container::new(content)
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

/// Shown once both a preview and a non-blank prompt exist.
fn summary<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    let UploadView::Ready { handle, .. } = ctx.upload else {
        return None;
    };
    if ctx.prompt.trim().is_empty() {
        return None;
    }

    let edge = Length::Fixed(sizing::SUMMARY_THUMBNAIL);
    let thumbnail: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(edge)
            .height(edge)
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(Text::new(""))
            .width(edge)
            .height(edge)
            .style(styles::container::thumbnail_placeholder)
            .into(),
    };

    let details = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(Text::new(ctx.prompt.trim()).size(typography::BODY))
        .push(
            Text::new(style_caption(ctx.i18n, ctx.style))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        );

    let body = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(ctx.i18n.tr("summary-title")).size(typography::BODY_SM))
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(thumbnail)
                .push(details),
        );

    Some(
        Container::new(body)
            .padding(spacing::SM)
            .width(Length::Fill)
            .style(styles::container::card)
            .into(),
    )
}

fn generate_button<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let label = Text::new(generate_label(ctx.i18n, ctx.generate)).size(typography::BODY_LG);

    let style: fn(&Theme, button::Status) -> button::Style = if ctx.generate.is_requesting() {
        styles::button::busy
    } else {
        styles::button::primary
    };

    let (content, message): (Element<'a, Message>, _) = match ctx.generate {
        GenerateState::Idle { ready } => (label.into(), ready.then_some(Message::Generate)),
        GenerateState::Requesting { .. } => (
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(
                    AnimatedSpinner::new(Color::WHITE, ctx.spinner_rotation)
                        .with_size(sizing::ICON_MD)
                        .into_element(),
                )
                .push(label)
                .into(),
            Some(Message::Cancel),
        ),
    };

    let generate = button(
        Container::new(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::GENERATE_BUTTON_HEIGHT))
    .style(style)
    .on_press_maybe(message);

    let mut column = Column::new().spacing(spacing::XXS).push(generate);
    if ctx.generate.is_requesting() {
        column = column.push(
            Text::new(ctx.i18n.tr("generate-cancel-hint"))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        );
    }
    column.into()
}
