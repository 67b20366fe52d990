// SPDX-License-Identifier: MPL-2.0
//! Style presets.

use std::fmt;

/// Visual preset applied by the style renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Editorial,
    Streetwear,
    Vintage,
    Minimalist,
    Artistic,
}

impl Style {
    /// All presets, in the order they are offered to the user.
    pub const ALL: [Style; 5] = [
        Style::Editorial,
        Style::Streetwear,
        Style::Vintage,
        Style::Minimalist,
        Style::Artistic,
    ];

    /// Returns the lowercase wire tag stored in generation records.
    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Style::Editorial => "editorial",
            Style::Streetwear => "streetwear",
            Style::Vintage => "vintage",
            Style::Minimalist => "minimalist",
            Style::Artistic => "artistic",
        }
    }

    /// Parses a wire tag. Matching is exact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Style::ALL.into_iter().find(|style| style.as_tag() == tag)
    }

    /// Returns the i18n key of the user-facing label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Style::Editorial => "style-editorial",
            Style::Streetwear => "style-streetwear",
            Style::Vintage => "style-vintage",
            Style::Minimalist => "style-minimalist",
            Style::Artistic => "style-artistic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Raw style tag as stored in a record.
///
/// Tags that do not name a known [`Style`] are preserved verbatim so that
/// persisted history round-trips exactly; the renderer treats them as
/// "no effect".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleTag(String);

impl StyleTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the known preset for this tag, if any.
    #[must_use]
    pub fn style(&self) -> Option<Style> {
        Style::from_tag(&self.0)
    }
}

impl Default for StyleTag {
    fn default() -> Self {
        Style::default().into()
    }
}

impl From<Style> for StyleTag {
    fn from(style: Style) -> Self {
        Self(style.as_tag().to_string())
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_round_trips_through_its_tag() {
        for style in Style::ALL {
            assert_eq!(Style::from_tag(style.as_tag()), Some(style));
        }
    }

    #[test]
    fn tag_matching_is_case_sensitive() {
        assert_eq!(Style::from_tag("Vintage"), None);
    }

    #[test]
    fn unknown_tag_is_preserved_but_has_no_style() {
        let tag = StyleTag::new("neon");
        assert_eq!(tag.as_str(), "neon");
        assert_eq!(tag.style(), None);
    }

    #[test]
    fn default_tag_is_editorial() {
        assert_eq!(StyleTag::default().style(), Some(Style::Editorial));
    }
}
