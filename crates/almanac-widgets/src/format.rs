//! Turning dates and selections into display text.

use crate::date_value::{DateValue, SelectionMode};
use crate::locale::LocaleConfig;
use chrono::{DateTime, Locale, NaiveDate, NaiveTime, Utc};
use std::fmt::Write;

/// How a selected date is written out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// The locale's own numeric date (`%x`), e.g. `03/05/24`.
    Short,
    /// Abbreviated month, two-digit day, full year: `Mar 05, 2024`.
    #[default]
    Medium,
    /// Full month name: `March 05, 2024`.
    Long,
    /// `2024-03-05`.
    Iso,
    /// Any `strftime` pattern understood by `chrono`.
    Custom(String),
}

impl DateFormat {
    pub fn pattern(&self) -> &str {
        match self {
            DateFormat::Short => "%x",
            DateFormat::Medium => "%b %d, %Y",
            DateFormat::Long => "%B %d, %Y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}

/// Format a calendar date with a locale.
///
/// `chrono` only localizes zoned values, so the date is pinned to UTC
/// midnight first. A pattern `chrono` cannot render falls back to ISO.
pub(crate) fn localized(date: NaiveDate, pattern: &str, locale: Locale) -> String {
    let mut out = String::new();
    let zoned = date.and_time(NaiveTime::MIN).and_utc();
    if write!(out, "{}", zoned.format_localized(pattern, locale)).is_err() {
        tracing::warn!(pattern, "unusable date pattern; using ISO format");
        out = date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Format one date.
pub fn format_date(date: NaiveDate, format: &DateFormat, locale: Locale) -> String {
    localized(date, format.pattern(), locale)
}

/// Format the calendar date `instant` falls on in the configured timezone.
pub fn format_instant(instant: DateTime<Utc>, format: &DateFormat, config: &LocaleConfig) -> String {
    format_date(config.date_at(instant), format, config.locale())
}

/// Text for a selection as a calendar in `mode` reads it: one date,
/// `start - end`, just `start` while the end is pending, or nothing.
///
/// A range-mode field shows nothing for a single date; a single-mode field
/// shows a range's start.
pub fn format_value(
    value: &DateValue,
    mode: SelectionMode,
    format: &DateFormat,
    locale: Locale,
) -> String {
    match value.endpoints(mode) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            format_date(start, format, locale),
            format_date(end, format, locale)
        ),
        (Some(start), None) => format_date(start, format, locale),
        (None, _) => String::new(),
    }
}
