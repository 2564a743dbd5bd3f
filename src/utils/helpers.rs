//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the engine.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use std::time::Duration;
use uuid::Uuid;

use crate::utils::errors::{KnuutError, Result};

/// Generate a new session-local identifier
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}

/// Parse an identifier sent by the client
pub fn parse_id(field: &str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| KnuutError::InvalidInput(format!("invalid {}: {}", field, value)))
}

/// Parse an event date
///
/// Accepts RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM[:SS]` or
/// `YYYY-MM-DD HH:MM[:SS]` forms, which are taken as UTC.
pub fn parse_event_date(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| KnuutError::InvalidInput(format!("invalid event_date: {}", value)))
}

/// Midnight on the first day of the month containing `now`
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Normalize a group type to its enum-like form (`"Mothers with kids"` -> `"mothers_with_kids"`)
pub fn normalize_group_type(group_type: &str) -> String {
    normalize_whitespace(group_type)
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Minutes used by a session; a started minute counts in full, minimum one
pub fn billable_minutes(elapsed: Duration) -> i32 {
    let minutes = elapsed.as_secs().div_ceil(60).max(1);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Format an event date for speech
pub fn format_event_date(date: DateTime<Utc>) -> String {
    date.format("%A %-d %B at %H:%M UTC").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
