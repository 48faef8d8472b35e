//! The `Employee` value object and its conversions.
//!
//! `Employee` is what the service hands to the presentation layer: the store row
//! with an optional identifier and an exact-decimal salary. This module also owns
//! the mapping to and from the entity, merging of edited records, and the six-field
//! text form used by add/update dialogs.

use crate::{
    core::{salary, validation},
    entities::employee,
    errors::Result,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::NotSet, Set};
use std::str::FromStr;
use tracing::{debug, error};
use validator::Validate;

/// Date layout used by every text field (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone accepts `1990-1-1`, `+1990-01-01` and leading blanks
#[allow(clippy::expect_used)]
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

/// An employee record as seen by the service and the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Employee {
    /// Store identifier, `None` until the record is persisted
    pub id: Option<i32>,
    /// Family name
    #[validate(custom(function = "validation::last_name_present"))]
    pub last_name: String,
    /// Job title
    #[validate(custom(function = "validation::position_present"))]
    pub position: String,
    /// Date of birth, strictly in the past
    #[validate(custom(function = "validation::born_in_past"))]
    pub birth_date: NaiveDate,
    /// First working day, today or earlier
    #[validate(custom(function = "validation::hired_by_today"))]
    pub hire_date: NaiveDate,
    /// Department number, positive
    #[validate(range(min = 1, message = "Department number cannot be negative!"))]
    pub department_number: i32,
    /// Salary in (0, 1 000 000) with at most two fraction digits
    #[validate(custom(function = "validation::salary_in_range"))]
    pub salary: Decimal,
}

impl From<employee::Model> for Employee {
    fn from(model: employee::Model) -> Self {
        Self {
            id: Some(model.id),
            last_name: model.last_name,
            position: model.position,
            birth_date: model.birth_date,
            hire_date: model.hire_date,
            department_number: model.department_number,
            salary: salary::from_cents(model.salary_cents),
        }
    }
}

impl Employee {
    /// Builds the active model used for insert (no id) or update (id set).
    ///
    /// # Errors
    /// Returns `InvalidArgument` if the salary cannot be stored in whole cents.
    pub fn to_active_model(&self) -> Result<employee::ActiveModel> {
        Ok(employee::ActiveModel {
            id: self.id.map_or(NotSet, Set),
            last_name: Set(self.last_name.clone()),
            position: Set(self.position.clone()),
            birth_date: Set(self.birth_date),
            hire_date: Set(self.hire_date),
            department_number: Set(self.department_number),
            salary_cents: Set(salary::to_cents(self.salary)?),
        })
    }
}

/// Combines an edited record with the identity of the record it replaces.
///
/// The identifier comes from `original`; every business field comes from `updated`.
#[must_use]
pub fn merge(original: &Employee, updated: Employee) -> Employee {
    debug!(original = ?original, updated = ?updated, "Merging employee records");
    Employee {
        id: original.id,
        ..updated
    }
}

/// The six text fields of the add/update form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeForm {
    /// Family name
    pub last_name: String,
    /// Job title
    pub position: String,
    /// Date of birth as `yyyy-MM-dd`
    pub birth_date: String,
    /// Hire date as `yyyy-MM-dd`
    pub hire_date: String,
    /// Department number as integer text
    pub department_number: String,
    /// Salary as decimal text with `.` separator
    pub salary: String,
}

impl EmployeeForm {
    /// Parses the form into an unsaved employee.
    ///
    /// Returns `None` (after logging) when a date or number does not parse; no
    /// field-level validation happens here.
    #[must_use]
    pub fn parse(&self) -> Option<Employee> {
        debug!("Converting text input to employee");
        let employee = Some(Employee {
            id: None,
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            birth_date: parse_field(&self.birth_date, "birth date", parse_date)?,
            hire_date: parse_field(&self.hire_date, "hire date", parse_date)?,
            department_number: parse_field(&self.department_number, "department number", |s| {
                s.parse::<i32>()
            })?,
            salary: parse_field(&self.salary, "salary", Decimal::from_str)?,
        });
        debug!(employee = ?employee, "Created employee from text");
        employee
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        Self {
            last_name: employee.last_name.clone(),
            position: employee.position.clone(),
            birth_date: employee.birth_date.format(DATE_FORMAT).to_string(),
            hire_date: employee.hire_date.format(DATE_FORMAT).to_string(),
            department_number: employee.department_number.to_string(),
            salary: employee.salary.to_string(),
        }
    }
}

fn parse_date(input: &str) -> std::result::Result<NaiveDate, String> {
    if !DATE_SHAPE.is_match(input) {
        return Err("expected yyyy-MM-dd".to_string());
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| e.to_string())
}

fn parse_field<T, E: std::fmt::Display>(
    input: &str,
    field: &str,
    parse: impl FnOnce(&str) -> std::result::Result<T, E>,
) -> Option<T> {
    parse(input)
        .inspect_err(|e| error!("Invalid input data for {field} {input:?}: {e}"))
        .ok()
}

/// Parses six raw text fields into an unsaved employee, or `None` if any date or
/// number is malformed.
#[must_use]
pub fn from_text(
    last_name: &str,
    position: &str,
    birth_date: &str,
    hire_date: &str,
    department_number: &str,
    salary: &str,
) -> Option<Employee> {
    EmployeeForm {
        last_name: last_name.to_string(),
        position: position.to_string(),
        birth_date: birth_date.to_string(),
        hire_date: hire_date.to_string(),
        department_number: department_number.to_string(),
        salary: salary.to_string(),
    }
    .parse()
}
