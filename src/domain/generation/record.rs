// SPDX-License-Identifier: MPL-2.0
//! Generation records and requests.

use super::StyleTag;
use std::fmt;

/// Opaque identifier of a generation record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationId(String);

impl GenerationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed styled-image result.
///
/// Fields are private and only readable; a record never changes after it
/// has been minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRecord {
    id: GenerationId,
    image_url: String,
    prompt: String,
    style: StyleTag,
    created_at: String,
}

impl GenerationRecord {
    /// Creates a record.
    ///
    /// `image_url` is a self-contained data URL and `created_at` an ISO-8601
    /// timestamp.
    #[must_use]
    pub fn new(
        id: GenerationId,
        image_url: impl Into<String>,
        prompt: impl Into<String>,
        style: StyleTag,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            image_url: image_url.into(),
            prompt: prompt.into(),
            style,
            created_at: created_at.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &GenerationId {
        &self.id
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn style(&self) -> &StyleTag {
        &self.style
    }

    #[must_use]
    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Inputs of a generate request: the preview, the prompt and the style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    preview: String,
    prompt: String,
    style: StyleTag,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(preview: impl Into<String>, prompt: impl Into<String>, style: StyleTag) -> Self {
        Self {
            preview: preview.into(),
            prompt: prompt.into(),
            style,
        }
    }

    /// Data URL of the downscaled source image.
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn style(&self) -> &StyleTag {
        &self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::Style;

    #[test]
    fn record_exposes_constructor_values() {
        let record = GenerationRecord::new(
            GenerationId::new("gen_1"),
            "data:image/jpeg;base64,AAAA",
            "a red coat",
            Style::Vintage.into(),
            "2026-01-02T03:04:05.000Z",
        );

        assert_eq!(record.id().as_str(), "gen_1");
        assert_eq!(record.image_url(), "data:image/jpeg;base64,AAAA");
        assert_eq!(record.prompt(), "a red coat");
        assert_eq!(record.style().style(), Some(Style::Vintage));
        assert_eq!(record.created_at(), "2026-01-02T03:04:05.000Z");
    }
}
