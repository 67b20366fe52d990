// SPDX-License-Identifier: MPL-2.0
//! Upload panel: file picker, drop hint, processing state and preview.

use super::format::format_file_size;
use super::{Message, UploadView, ViewContext};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, image, Column, Container, Row, Space, Text};
use iced::{alignment, ContentFit, Element, Length};

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("upload-title")).size(typography::TITLE_SM);

    let body = match ctx.upload {
        UploadView::Empty => picker(ctx),
        UploadView::Processing => processing(ctx),
        UploadView::Ready { source, handle } => preview(ctx, source, handle),
    };

    Container::new(Column::new().spacing(spacing::MD).push(title).push(body))
        .padding(spacing::LG)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

fn picker<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let open_button = button(Text::new(ctx.i18n.tr("upload-open-button")))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(Message::OpenFileDialog);

    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(open_button)
        .push(
            Text::new(ctx.i18n.tr("upload-drop-hint"))
                .size(typography::BODY_SM)
                .color(ctx.colors.text_secondary),
        )
        .push(
            Text::new(ctx.i18n.tr("upload-formats"))
                .size(typography::CAPTION)
                .color(ctx.colors.text_secondary),
        );

    Container::new(content)
        .padding(spacing::XL)
        .center_x(Length::Fill)
        .style(styles::container::drop_zone)
        .into()
}

fn processing<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(AnimatedSpinner::new(ctx.colors.brand_primary, ctx.spinner_rotation).into_element())
        .push(Text::new(ctx.i18n.tr("upload-processing")).size(typography::BODY));

    Container::new(content)
        .padding(spacing::XL)
        .center_x(Length::Fill)
        .style(styles::container::drop_zone)
        .into()
}

fn preview<'a>(
    ctx: &ViewContext<'a>,
    source: Option<&'a crate::media::SourceFile>,
    handle: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .content_fit(ContentFit::Contain)
            .into(),
        None => Container::new(Text::new(ctx.i18n.tr("history-image-fallback")))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .style(styles::container::thumbnail_placeholder)
            .into(),
    };

    let label: Element<'a, Message> = match source {
        Some(source) => Row::new()
            .spacing(spacing::XS)
            .push(Text::new(source.name.as_str()).size(typography::BODY_SM))
            .push(
                Text::new(format!("({})", format_file_size(source.size_bytes)))
                    .size(typography::CAPTION)
                    .color(ctx.colors.text_secondary),
            )
            .into(),
        None => Text::new(ctx.i18n.tr("upload-restored-label"))
            .size(typography::BODY_SM)
            .color(ctx.colors.text_secondary)
            .into(),
    };

    let remove_button = button(Text::new(ctx.i18n.tr("upload-remove-button")).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary)
        .on_press(Message::ClearFile);

    let replace_button = button(Text::new(ctx.i18n.tr("upload-open-button")).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::secondary)
        .on_press(Message::OpenFileDialog);

    let footer = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(label)
        .push(Space::new().width(Length::Fill))
        .push(replace_button)
        .push(remove_button);

    Column::new()
        .spacing(spacing::SM)
        .push(picture)
        .push(footer)
        .into()
}
