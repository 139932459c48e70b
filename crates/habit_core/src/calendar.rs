//! Calendar-date key utilities.
//!
//! # Responsibility
//! - Produce `YYYY-MM-DD` keys relative to a "today" anchor.
//! - Produce ascending windows of consecutive day keys.
//!
//! # Invariants
//! - Offsets use calendar-day arithmetic on `NaiveDate`, never raw time math.
//! - Un-anchored helpers read the local-timezone date exactly once per call.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::model::habit::DateKey;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Returns the local calendar date for the current instant.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns today's key in the local timezone.
pub fn today_key() -> DateKey {
    format_date_key(today())
}

/// Returns the key for `today + offset_days`.
pub fn date_key_with_offset(offset_days: i64) -> DateKey {
    date_key_from(today(), offset_days)
}

/// Returns `n` keys ending with today, oldest first.
pub fn last_n_days_ascending(n: usize) -> Vec<DateKey> {
    last_n_days_ending(today(), n)
}

/// Returns the key for `anchor + offset_days`.
///
/// Offsets that leave chrono's representable range clamp to the anchor's
/// boundary date instead of panicking.
pub fn date_key_from(anchor: NaiveDate, offset_days: i64) -> DateKey {
    format_date_key(shift_days(anchor, offset_days))
}

/// Returns `n` consecutive keys ending at `anchor`, oldest first.
///
/// `n == 0` yields an empty window.
pub fn last_n_days_ending(anchor: NaiveDate, n: usize) -> Vec<DateKey> {
    (0..n)
        .rev()
        .map(|back| date_key_from(anchor, -(back as i64)))
        .collect()
}

/// Formats a date as a `YYYY-MM-DD` key.
pub fn format_date_key(date: NaiveDate) -> DateKey {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` key.
///
/// Rejects keys chrono would otherwise accept loosely, such as `2024-1-5`,
/// so that parsed keys always sort chronologically.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    if key.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()?;
    (format_date_key(date) == key).then_some(date)
}

/// Returns whether `key` is a well-formed calendar-date key.
pub fn is_valid_date_key(key: &str) -> bool {
    parse_date_key(key).is_some()
}

/// Returns the short English weekday name (`Mon`..`Sun`) for a key.
pub fn day_name(key: &str) -> Option<&'static str> {
    let name = match parse_date_key(key)?.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    };
    Some(name)
}

pub(crate) fn shift_days(anchor: NaiveDate, offset_days: i64) -> NaiveDate {
    let magnitude = Days::new(offset_days.unsigned_abs());
    let shifted = if offset_days >= 0 {
        anchor.checked_add_days(magnitude)
    } else {
        anchor.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if offset_days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}
