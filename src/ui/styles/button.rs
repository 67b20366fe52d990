// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn rounded(color: Color) -> Border {
    Border {
        color,
        width: border::WIDTH_SM,
        radius: radius::MD.into(),
    }
}

/// Primary call to action ("Generate Image", "Click to upload").
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);

    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: rounded(palette::PRIMARY_600),
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: rounded(palette::PRIMARY_500),
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(if is_light {
                palette::GRAY_200
            } else {
                palette::GRAY_700
            })),
            text_color: palette::GRAY_400,
            border: rounded(palette::GRAY_400),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// The generate button while a request is in flight. Pressing it cancels.
pub fn busy(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::ERROR_500,
        _ => palette::PRIMARY_600,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: rounded(background),
        shadow: shadow::SM,
        snap: true,
    }
}

/// Secondary action ("Remove image").
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);

    let (bg_color, text_color) = if is_light {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(if is_light {
                palette::GRAY_200
            } else {
                Color::from_rgb(0.35, 0.35, 0.35)
            })),
            text_color: palette::ERROR_500,
            border: rounded(palette::ERROR_500),
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color: palette::GRAY_400,
            border: rounded(palette::GRAY_400),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color,
            border: rounded(palette::GRAY_400),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// A clickable history card in the sidebar.
pub fn history_entry(theme: &Theme, status: button::Status) -> button::Style {
    let palette = theme.extended_palette();
    let text_color = palette.background.base.text;

    let (background, border_color, card_shadow) = match status {
        button::Status::Hovered => (
            palette.background.weak.color,
            palette::PRIMARY_400,
            shadow::MD,
        ),
        button::Status::Pressed => (
            palette.background.strong.color,
            palette::PRIMARY_500,
            shadow::SM,
        ),
        _ => (
            palette.background.base.color,
            palette.background.strong.color,
            shadow::NONE,
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: rounded(border_color),
        shadow: card_shadow,
        snap: true,
    }
}
