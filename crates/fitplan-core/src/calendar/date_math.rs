//! Pure calendar arithmetic.
//!
//! Every function here is total over valid `NaiveDate`s. Weeks are
//! Monday-based and week numbers follow ISO-8601 (Thursday-anchored).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// ISO-8601 week number of `date`.
///
/// Shifts the date to the Thursday of its week, then takes
/// `ceil(day_of_year(thursday) / 7)`.
pub fn week_number(date: NaiveDate) -> u32 {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let thursday = date + Duration::days(3 - from_monday);
    thursday.ordinal().div_ceil(7)
}

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(from_monday)
}

/// Whole-day difference `b - a`.
pub fn day_offset(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Whole-day difference `b - a` with both sides normalized to midnight first.
///
/// `2024-01-15 23:59` to `2024-01-16 00:01` is one day, not zero.
pub fn day_offset_at(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    day_offset(a.date(), b.date())
}

/// Number of whole weeks between the weeks containing `a` and `b`.
///
/// Negative when `b` lies in an earlier week.
pub fn weeks_between(a: NaiveDate, b: NaiveDate) -> i64 {
    day_offset(start_of_week(a), start_of_week(b)).div_euclid(7)
}

/// Date at position `index` of a sequence starting at `start`.
pub fn date_at_index(start: NaiveDate, index: usize) -> NaiveDate {
    start + Duration::days(index as i64)
}

/// Position of `date` in a sequence of `len` days starting at `start`.
///
/// Returns `None` when the date falls outside `[start, start + len)`.
pub fn index_of_date(start: NaiveDate, len: usize, date: NaiveDate) -> Option<usize> {
    let offset = day_offset(start, date);
    if offset < 0 {
        return None;
    }
    let index = offset as usize;
    (index < len).then_some(index)
}

/// Short English label for a weekday (`Mon` .. `Sun`).
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
