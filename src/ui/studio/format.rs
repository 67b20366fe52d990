// SPDX-License-Identifier: MPL-2.0
//! Human-readable labels for file sizes and generation dates.

use crate::domain::generation::StyleTag;
use crate::i18n::fluent::I18n;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Formats a byte count with binary units, two decimals at most.
///
/// Trailing zeros are dropped, so 1536 bytes reads `1.5 KB` and 1024 bytes
/// reads `1 KB`. Zero is `0 B`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit + 1 < UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / divisor as f64;
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Localized display name of a style tag. Unknown tags are shown verbatim.
#[must_use]
pub fn style_name(i18n: &I18n, tag: &StyleTag) -> String {
    match tag.style() {
        Some(style) => i18n.tr(style.i18n_key()),
        None => tag.as_str().to_owned(),
    }
}

/// "<style> style" line shown in the summary and history entries.
#[must_use]
pub fn style_caption(i18n: &I18n, tag: &StyleTag) -> String {
    i18n.tr_with_args("style-suffix", &[("style", &style_name(i18n, tag))])
}

/// Formats an RFC 3339 timestamp in local time with a strftime `pattern`.
///
/// Returns the raw value when it does not parse or the pattern is invalid.
#[must_use]
pub fn format_created_at(raw: &str, pattern: &str) -> String {
    format_created_at_in(raw, pattern, &Local)
}

fn format_created_at_in<Tz>(raw: &str, pattern: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return raw.to_owned();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp
            .with_timezone(tz)
            .format_with_items(StrftimeItems::new(pattern))
            .to_string(),
        Err(_) => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::domain::generation::Style;
    use chrono::Utc;

    #[test]
    fn format_file_size_formats_correctly() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(2_411_724), "2.3 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn format_file_size_keeps_two_decimals() {
        // 1.2345 KB
        assert_eq!(format_file_size(1264), "1.23 KB");
    }

    #[test]
    fn format_file_size_stops_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1_073_741_824), "2048 GB");
    }

    #[test]
    fn created_at_is_formatted_with_pattern() {
        assert_eq!(
            format_created_at_in("2026-10-14T09:05:00.000Z", "%d/%m/%Y %H:%M", &Utc),
            "14/10/2026 09:05"
        );
    }

    #[test]
    fn unparsable_created_at_is_shown_verbatim() {
        assert_eq!(format_created_at_in("yesterday", "%d/%m/%Y", &Utc), "yesterday");
        assert_eq!(
            format_created_at_in("2026-10-14T09:05:00.000Z", "%Q", &Utc),
            "2026-10-14T09:05:00.000Z"
        );
    }

    #[test]
    fn style_caption_is_localized() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(style_caption(&i18n, &Style::Vintage.into()), "Vintage style");
        assert_eq!(style_caption(&i18n, &StyleTag::new("cyberpunk")), "cyberpunk style");
    }
}
