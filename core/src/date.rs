//! Due-date normalization.
//!
//! Dates are stored and compared as `YYYY-MM-DD` text, so every date a client
//! sends is parsed into a calendar date first and rendered back in that one
//! form. Inputs carrying a time of day keep only their calendar date, taken in
//! the offset they were written in.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::TodoError;

/// Canonical rendering used for storage and comparison.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &[
    CANONICAL_FORMAT,
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a loosely formatted date into a `NaiveDate`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
                .map(|dt| dt.date())
        })
}

/// Render `input` as `YYYY-MM-DD`, or fail with `InvalidDate`.
pub fn normalize_date(input: &str) -> Result<String, TodoError> {
    parse_date(input)
        .map(|date| date.format(CANONICAL_FORMAT).to_string())
        .ok_or(TodoError::InvalidDate)
}
