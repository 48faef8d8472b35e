//! Field constraints for employee records.
//!
//! Constraints are declared on `Employee` through `validator`; the functions here
//! are the custom rules it refers to. Violations are reported to the presentation
//! boundary as (field, message) pairs instead of being raised inside the service.

use crate::core::{age, record::Employee};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Largest number of integer digits a salary may have.
pub const SALARY_INTEGER_DIGITS: usize = 7;
/// Largest number of fraction digits a salary may have.
pub const SALARY_FRACTION_DIGITS: u32 = 2;

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

/// Checks every constraint on `employee`.
///
/// # Errors
/// Returns every violation, sorted by field name, when at least one constraint fails.
pub fn check(employee: &Employee) -> Result<(), Vec<FieldViolation>> {
    let Err(errors) = employee.validate() else {
        return Ok(());
    };

    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldViolation {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    Err(violations)
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn last_name_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("blank", "Last name is mandatory!"));
    }
    Ok(())
}

pub(crate) fn position_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("blank", "Employee position is mandatory!"));
    }
    Ok(())
}

pub(crate) fn born_in_past(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value >= age::today() {
        return Err(violation("past", "Date of birth must be in the past!"));
    }
    Ok(())
}

pub(crate) fn hired_by_today(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > age::today() {
        return Err(violation(
            "past_or_present",
            "Hire date must be between present and past!",
        ));
    }
    Ok(())
}

pub(crate) fn salary_in_range(value: &Decimal) -> Result<(), ValidationError> {
    let upper = Decimal::from(1_000_000);
    if *value <= Decimal::ZERO || *value >= upper {
        return Err(violation(
            "range",
            "Salary must be greater than 0 and less than 1000000!",
        ));
    }

    let normalized = value.normalize();
    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len();
    if normalized.scale() > SALARY_FRACTION_DIGITS || integer_digits > SALARY_INTEGER_DIGITS {
        return Err(violation(
            "digits",
            "Salary may have at most 7 integer and 2 fraction digits!",
        ));
    }
    Ok(())
}
