//! Application settings loaded from `config.toml`.
//!
//! The file is optional. It can pin the UI locale and list employees to seed an
//! empty database with; seed rows use the same text fields as the add form.

use crate::{
    core::record::{Employee, EmployeeForm},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default settings file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Structure of the whole `config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Startup locale tag (`en-GB` or `ru`); system locale when absent
    #[serde(default)]
    pub locale: Option<String>,
    /// Employees inserted when the table is empty
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
}

/// One seed employee, written as form text.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EmployeeSeed {
    /// Family name
    pub last_name: String,
    /// Job title
    pub position: String,
    /// `yyyy-MM-dd`
    pub birth_date: String,
    /// `yyyy-MM-dd`
    pub hire_date: String,
    /// Department number
    pub department_number: i32,
    /// Salary as decimal text
    pub salary: String,
}

impl EmployeeSeed {
    /// The seed as add-form text.
    #[must_use]
    pub fn form(&self) -> EmployeeForm {
        EmployeeForm {
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            birth_date: self.birth_date.clone(),
            hire_date: self.hire_date.clone(),
            department_number: self.department_number.to_string(),
            salary: self.salary.clone(),
        }
    }
}

impl From<&Employee> for EmployeeSeed {
    fn from(employee: &Employee) -> Self {
        let form = EmployeeForm::from(employee);
        Self {
            last_name: form.last_name,
            position: form.position,
            birth_date: form.birth_date,
            hire_date: form.hire_date,
            department_number: employee.department_number,
            salary: form.salary,
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid settings TOML.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads `./config.toml`, falling back to defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    if !Path::new(DEFAULT_CONFIG_PATH).exists() {
        info!("No {DEFAULT_CONFIG_PATH} found, using default settings");
        return Ok(Settings::default());
    }
    load_settings(DEFAULT_CONFIG_PATH)
}
