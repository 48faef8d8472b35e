//! Shared test utilities for the employee desk.
//!
//! This module provides helpers for setting up test databases and creating
//! employees with sensible defaults.

use crate::{
    core::{
        employee,
        record::{self, Employee},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// An unsaved employee with sensible defaults.
///
/// # Defaults
/// * `position`: "Developer"
/// * `birth_date`: 1990-01-01
/// * `hire_date`: 2020-01-01
/// * `department_number`: 1
/// * `salary`: 50000.00
#[allow(clippy::unwrap_used)]
pub fn test_employee(last_name: &str) -> Employee {
    record::from_text(last_name, "Developer", "1990-01-01", "2020-01-01", "1", "50000.00").unwrap()
}

/// Saves an employee built by [`test_employee`].
pub async fn create_test_employee(db: &DatabaseConnection, last_name: &str) -> Result<Employee> {
    employee::save_employee(db, &test_employee(last_name)).await
}

/// Saves an employee with custom dates, department and salary.
pub async fn create_custom_employee(
    db: &DatabaseConnection,
    last_name: &str,
    birth_date: &str,
    hire_date: &str,
    department_number: i32,
    salary: &str,
) -> Result<Employee> {
    let employee = record::from_text(
        last_name,
        "Developer",
        birth_date,
        hire_date,
        &department_number.to_string(),
        salary,
    )
    .ok_or_else(|| Error::InvalidArgument {
        message: format!("bad test employee {last_name}"),
    })?;
    employee::save_employee(db, &employee).await
}
