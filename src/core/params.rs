//! Parameter parser for the shortcut value field.
//!
//! One free-text field feeds every shortcut. Each shape is a fixed pattern over the
//! whole (trimmed) input; anything else aborts the shortcut with a log line and no
//! store call. `.` is the only decimal separator.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{error, warn};

#[allow(clippy::expect_used)] // Literal patterns, checked by the tests below
static SINGLE_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid integer pattern"));

#[allow(clippy::expect_used)]
static INTEGER_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+):(\d+)\s*$").expect("valid pair pattern"));

#[allow(clippy::expect_used)]
static DECIMAL_INTEGER_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?):(\d+)\s*$").expect("valid decimal pair pattern")
});

/// `D:A` input of the younger-than shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentAge {
    /// Department number
    pub department: i32,
    /// Exclusive upper age bound
    pub age: i32,
}

/// `P:Y` input of the salary raise shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaiseParams {
    /// Raise in percent
    pub percent: Decimal,
    /// Minimum tenure in whole years
    pub min_years: i32,
}

fn to_i32(digits: &str, input: &str) -> Option<i32> {
    digits
        .parse::<i32>()
        .inspect_err(|e| error!("Error during integer parsing of {input:?}: {e}"))
        .ok()
}

/// Parses a single non-negative integer (years, age or employee id).
#[must_use]
pub fn parse_integer(input: &str) -> Option<i32> {
    let Some(caps) = SINGLE_INTEGER.captures(input) else {
        warn!("No integer found in entered value {input:?}");
        return None;
    };
    to_i32(&caps[1], input)
}

/// Parses `department:age`.
#[must_use]
pub fn parse_department_age(input: &str) -> Option<DepartmentAge> {
    let Some(caps) = INTEGER_PAIR.captures(input) else {
        warn!("No department:age match found in entered value {input:?}");
        return None;
    };
    Some(DepartmentAge {
        department: to_i32(&caps[1], input)?,
        age: to_i32(&caps[2], input)?,
    })
}

/// Parses `percent:years`, where the percent may carry a fraction.
#[must_use]
pub fn parse_raise(input: &str) -> Option<RaiseParams> {
    let Some(caps) = DECIMAL_INTEGER_PAIR.captures(input) else {
        warn!("No percent:years match found in entered value {input:?}");
        return None;
    };
    let percent = Decimal::from_str(&caps[1])
        .inspect_err(|e| error!("Invalid percentage in {input:?}: {e}"))
        .ok()?;
    Some(RaiseParams {
        percent,
        min_years: to_i32(&caps[2], input)?,
    })
}
