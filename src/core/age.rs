//! Calendar arithmetic for ages and tenure.
//!
//! Whole years are counted the way a calendar period is: a year only counts once
//! the month/day anniversary has been reached, so leap days and month ends behave
//! like ordinary date-period subtraction rather than `days / 365`.

use chrono::{Local, NaiveDate};

/// Today's date in the local calendar.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole years from `from` to `to`.
///
/// The result is negative when `to` precedes `from`; callers that feed in a hire
/// date earlier than the birth date get that negative count back unchanged.
#[must_use]
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    to.years_since(from).map_or_else(
        || from.years_since(to).map_or(0, |years| -saturating_i32(years)),
        saturating_i32,
    )
}

fn saturating_i32(years: u32) -> i32 {
    i32::try_from(years).unwrap_or(i32::MAX)
}
