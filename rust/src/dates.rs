//! Day-granularity date utilities.
//!
//! Every date comparison in the crate goes through these functions. Dates are
//! plain calendar days (`NaiveDate`), so there is no timezone to shift a
//! `YYYY-MM-DD` string onto the previous or next day.

use chrono::{Duration, NaiveDate};

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Returns `None` for empty input, a segment count other than three,
/// non-numeric segments, or a day that does not exist in the calendar.
pub fn parse_local_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = year.trim().parse().ok()?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date, substituting `fallback` (usually today) for malformed input.
pub fn parse_local_date_or(s: &str, fallback: NaiveDate) -> NaiveDate {
    parse_local_date(s).unwrap_or(fallback)
}

/// Whole days from `a` to `b`; positive when `b` is later.
#[inline]
pub fn days_diff(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Offset a date by `days` (negative moves backwards).
///
/// Offsets that would leave chrono's representable range return `date`.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

/// Render a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render an optional date, using the empty string for a missing one.
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// Whether an unfinished task has passed its end date.
///
/// Completed tasks (`progress >= 100`) are never overdue, and neither is a
/// task whose end date does not parse.
pub fn is_overdue(end_date: &str, progress: i32, today: NaiveDate) -> bool {
    if progress >= 100 {
        return false;
    }
    parse_local_date(end_date).is_some_and(|end| end < today)
}

/// Duration in days between two date strings.
///
/// Milestones have no duration. Unparseable dates and end-before-start spans
/// also yield 0.
pub fn task_duration(start_date: &str, end_date: &str, is_milestone: bool) -> i64 {
    if is_milestone {
        return 0;
    }
    match (parse_local_date(start_date), parse_local_date(end_date)) {
        (Some(start), Some(end)) => days_diff(start, end).max(0),
        _ => 0,
    }
}
