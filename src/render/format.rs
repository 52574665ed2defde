//! Display formatting of date cells.

use std::fmt::Write;

use chrono::{DateTime, Utc};

/// Formats a date for a `date` column using the grid's `dateFormat` option.
pub trait DateFormatter {
    fn format(&self, date: &DateTime<Utc>, pattern: &str) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&DateTime<Utc>, &str) -> String,
{
    fn format(&self, date: &DateTime<Utc>, pattern: &str) -> String {
        self(date, pattern)
    }
}

/// strftime pattern for a named format, if `name` is one.
pub fn named_format(name: &str) -> Option<&'static str> {
    Some(match name {
        "default" => "%a %b %d %Y %H:%M:%S",
        "shortDate" => "%-m/%-d/%y",
        "mediumDate" => "%b %-d, %Y",
        "longDate" => "%B %-d, %Y",
        "fullDate" => "%A, %B %-d, %Y",
        "isoDate" => "%Y-%m-%d",
        "isoDateTime" => "%Y-%m-%dT%H:%M:%S",
        "isoTime" => "%H:%M:%S",
        _ => return None,
    })
}

/// [`DateFormatter`] backed by `chrono`.
///
/// Accepts the named formats of [`named_format`] or any strftime pattern;
/// an invalid pattern falls back to `default`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateFormatter;

impl DateFormatter for ChronoDateFormatter {
    fn format(&self, date: &DateTime<Utc>, pattern: &str) -> String {
        let pattern = named_format(pattern).unwrap_or(pattern);
        let mut out = String::new();
        if write!(out, "{}", date.format(pattern)).is_ok() {
            return out;
        }
        log::debug!("invalid date pattern {pattern:?}, using default");
        out.clear();
        let fallback = named_format("default").unwrap_or("%Y-%m-%d");
        // The fallback pattern is valid, so this write cannot fail.
        let _ = write!(out, "{}", date.format(fallback));
        out
    }
}
