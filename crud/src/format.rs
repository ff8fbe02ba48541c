//! Cell formatters shared by table columns.
//!
//! Every formatter returns its input unchanged when it cannot parse it, so a
//! column never renders blank because the backend sent an unexpected shape.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// `2025-07-28T19:00:00Z` → `28 Jul 2025, 7:00 PM`, in the timestamp's own
/// offset. Naive timestamps are taken as-is.
#[must_use]
pub fn format_datetime(raw: &str) -> String {
    let out = format_description!("[day] [month repr:short] [year], [hour repr:12 padding:none]:[minute] [period]");
    parse_datetime(raw.trim())
        .and_then(|dt| dt.format(out).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// `2025-07-28` → `28 Jul 2025`. Full timestamps keep only their date.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let out = format_description!("[day] [month repr:short] [year]");
    parse_date(raw.trim())
        .and_then(|d| d.format(out).ok())
        .unwrap_or_else(|| raw.to_owned())
}

fn parse_datetime(s: &str) -> Option<PrimitiveDateTime> {
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(PrimitiveDateTime::new(dt.date(), dt.time()));
    }
    PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .or_else(|_| PrimitiveDateTime::parse(s, format_description!("[year]-[month]-[day]T[hour]:[minute]")))
        .ok()
}

fn parse_date(s: &str) -> Option<Date> {
    let ymd = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(s, ymd) {
        return Some(date);
    }
    // Timestamps of any precision start with their calendar date.
    s.get(..10).filter(|_| s.len() > 10).and_then(|head| Date::parse(head, ymd).ok())
}

/// Human file size with up to two decimals: `1536` → `1.5 KB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let mut rounded = (value * 100.0).round() / 100.0;
    if rounded >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        rounded = (rounded / 1024.0 * 100.0).round() / 100.0;
        unit += 1;
    }
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", BYTE_UNITS[unit])
}
