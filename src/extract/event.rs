use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::destination::extract_destination;
use crate::utils::text::{combine_texts, is_filled, truncate_chars};
use crate::utils::time::{datetime_from_parts, default_end, format_local_datetime};

/// Title used when neither a labeled subject nor a summary is available
pub const DEFAULT_TITLE: &str = "予定";

/// Longest title taken from a summary's first line
pub const MAX_FALLBACK_TITLE_CHARS: usize = 60;

lazy_static! {
    static ref TITLE_REGEX: Regex =
        Regex::new(r"(?m)^[ \x{3000}]*(?:件名|タイトル|題名)[ \x{3000}]*[:：][ \x{3000}]*(.+)$").unwrap();

    // 2024/3/15 9:05, 2024-03-15 14:30
    static ref START_REGEX: Regex = Regex::new(
        r"([0-9]{4})[/-]([0-9]{1,2})[/-]([0-9]{1,2})[ \x{3000}]+([0-9]{1,2}):([0-9]{2})"
    )
    .unwrap();
}

/// Calendar event fields held by the caller (typically a form).
///
/// Blank strings count as "not set" everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFields {
    pub title: String,
    pub location: Option<String>,
    /// Local datetime, `YYYY-MM-DDTHH:mm`
    pub start: Option<String>,
    /// Local datetime, `YYYY-MM-DDTHH:mm`
    pub end: Option<String>,
    pub details: String,
}

/// Fill the blank fields of `current` from the email and its summary.
///
/// A field the caller already filled is never replaced.
pub fn extract_event_fields(email: &str, summary: &str, current: EventFields) -> EventFields {
    let mut fields = current;
    let combined = combine_texts(&[email, summary]);

    if fields.title.trim().is_empty() {
        fields.title = find_title(&combined).unwrap_or_else(|| fallback_title(summary));
    }

    if !is_filled(&fields.location) {
        if let Some(location) = extract_destination(&combined) {
            fields.location = Some(location);
        }
    }

    if !is_filled(&fields.start) {
        if let Some(start) = find_start(&combined) {
            debug!(start = %start, "Found event start");
            fields.start = Some(start);
        }
    }

    if !is_filled(&fields.end) {
        if let Some(end) = fields.start.as_deref().and_then(default_end) {
            fields.end = Some(end);
        }
    }

    if fields.details.trim().is_empty() {
        fields.details = if summary.trim().is_empty() {
            email.to_string()
        } else {
            summary.to_string()
        };
    }

    fields
}

fn find_title(text: &str) -> Option<String> {
    let caps = TITLE_REGEX.captures(text)?;
    let title = caps[1].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

fn fallback_title(summary: &str) -> String {
    let first_line = summary
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(DEFAULT_TITLE);
    truncate_chars(first_line, MAX_FALLBACK_TITLE_CHARS).to_string()
}

fn find_start(text: &str) -> Option<String> {
    START_REGEX.captures_iter(text).find_map(|caps| {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        let hour = caps[4].parse().ok()?;
        let minute = caps[5].parse().ok()?;
        datetime_from_parts(year, month, day, hour, minute).map(|dt| format_local_datetime(&dt))
    })
}
