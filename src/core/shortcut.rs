//! Canned HR queries ("shortcuts") and the panel that drives them.
//!
//! A `Shortcut` names one query together with its prompt and whether it needs the
//! value field at all. Parsing the field yields a typed `ShortcutRequest`, which is
//! the only thing that ever touches the store; an unparsable field therefore never
//! reaches the database.

use crate::{
    core::{
        age,
        employee,
        params::{self, DepartmentAge, RaiseParams},
        record::Employee,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

/// The eight canned queries offered next to the employee table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Employees of a department younger than an age (`D:A`)
    FindYounger,
    /// Five lowest salaries
    MinSalary,
    /// Five highest salaries
    HighestSalary,
    /// Employees with at least N years of tenure
    WorkingSince,
    /// Employees older than an age
    OlderThan,
    /// Current age of one employee by id
    CurrentAge,
    /// Age at hire of one employee by id
    AgeAtHire,
    /// Raise long-term employees (`P:Y`)
    IncreaseSalary,
}

impl Shortcut {
    /// Every shortcut in menu order.
    pub const ALL: [Self; 8] = [
        Self::FindYounger,
        Self::MinSalary,
        Self::HighestSalary,
        Self::WorkingSince,
        Self::OlderThan,
        Self::CurrentAge,
        Self::AgeAtHire,
        Self::IncreaseSalary,
    ];

    /// Translation key of the menu label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::FindYounger => "shortcut.findYounger",
            Self::MinSalary => "shortcut.minSalary",
            Self::HighestSalary => "shortcut.highestSalary",
            Self::WorkingSince => "shortcut.workingSince",
            Self::OlderThan => "shortcut.olderThan",
            Self::CurrentAge => "shortcut.getCurrentAge",
            Self::AgeAtHire => "shortcut.getAgeAtHire",
            Self::IncreaseSalary => "shortcut.increaseSalary",
        }
    }

    /// Translation key of the value field prompt; `None` when no input is taken.
    #[must_use]
    pub const fn prompt_key(self) -> Option<&'static str> {
        match self {
            Self::FindYounger => Some("shortcut.findYounger.prompt"),
            Self::MinSalary | Self::HighestSalary => None,
            Self::WorkingSince => Some("shortcut.workingSince.prompt"),
            Self::OlderThan => Some("shortcut.olderThan.prompt"),
            Self::CurrentAge => Some("shortcut.getCurrentAge.prompt"),
            Self::AgeAtHire => Some("shortcut.getAgeAtHire.prompt"),
            Self::IncreaseSalary => Some("shortcut.increaseSalary.prompt"),
        }
    }

    /// Whether the free-text value field is disabled for this shortcut.
    #[must_use]
    pub const fn input_disabled(self) -> bool {
        matches!(self, Self::MinSalary | Self::HighestSalary)
    }

    /// Turns the value field into a request, or `None` if it does not fit this
    /// shortcut's pattern.
    #[must_use]
    pub fn parse(self, input: &str) -> Option<ShortcutRequest> {
        let request = match self {
            Self::FindYounger => ShortcutRequest::YoungerThan(params::parse_department_age(input)?),
            Self::MinSalary => ShortcutRequest::MinSalary,
            Self::HighestSalary => ShortcutRequest::MaxSalary,
            Self::WorkingSince => ShortcutRequest::WorkingSince {
                years: params::parse_integer(input)?,
            },
            Self::OlderThan => ShortcutRequest::OlderThan {
                age: params::parse_integer(input)?,
            },
            Self::CurrentAge => ShortcutRequest::CurrentAge {
                id: params::parse_integer(input)?,
            },
            Self::AgeAtHire => ShortcutRequest::AgeAtHire {
                id: params::parse_integer(input)?,
            },
            Self::IncreaseSalary => ShortcutRequest::IncreaseSalary(params::parse_raise(input)?),
        };
        Some(request)
    }
}

/// A fully parsed shortcut, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutRequest {
    /// Department members younger than an age
    YoungerThan(DepartmentAge),
    /// Lowest salaries
    MinSalary,
    /// Highest salaries
    MaxSalary,
    /// Tenure of at least `years`
    WorkingSince {
        /// Minimum whole years of tenure
        years: i32,
    },
    /// Older than `age`
    OlderThan {
        /// Exclusive lower age bound
        age: i32,
    },
    /// Current age of employee `id`
    CurrentAge {
        /// Employee identifier
        id: i32,
    },
    /// Age at hire of employee `id`
    AgeAtHire {
        /// Employee identifier
        id: i32,
    },
    /// Raise long-term employees
    IncreaseSalary(RaiseParams),
}

/// What a shortcut produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    /// Rows to show in the employee table
    Employees(Vec<Employee>),
    /// A single age answer
    Age {
        /// Translation key of the answer label
        answer_key: &'static str,
        /// Employee the answer is about
        employee: Employee,
        /// Whole years
        years: i32,
    },
}

impl ShortcutRequest {
    /// Runs the request against the store, with "today" fixed to `today`.
    ///
    /// # Errors
    /// `EmployeeNotFound` for age lookups of an unknown id; store errors propagate.
    pub async fn execute(self, db: &DatabaseConnection, today: NaiveDate) -> Result<ShortcutOutcome> {
        debug!(request = ?self, "Executing shortcut");
        let outcome = match self {
            Self::YoungerThan(DepartmentAge { department, age }) => ShortcutOutcome::Employees(
                employee::get_employees_in_department_younger_than_as_of(db, department, age, today)
                    .await?,
            ),
            Self::MinSalary => {
                ShortcutOutcome::Employees(employee::get_employees_with_min_salary(db).await?)
            }
            Self::MaxSalary => {
                ShortcutOutcome::Employees(employee::get_employees_with_max_salary(db).await?)
            }
            Self::WorkingSince { years } => ShortcutOutcome::Employees(
                employee::get_long_term_employees_as_of(db, years, today).await?,
            ),
            Self::OlderThan { age } => {
                ShortcutOutcome::Employees(employee::find_old_employees_as_of(db, age, today).await?)
            }
            Self::CurrentAge { id } => {
                let found = employee::find_by_id(db, id).await?;
                ShortcutOutcome::Age {
                    answer_key: "shortcut.getCurrentAge.answer",
                    years: employee::get_age_as_of(&found, today),
                    employee: found,
                }
            }
            Self::AgeAtHire { id } => {
                let found = employee::find_by_id(db, id).await?;
                ShortcutOutcome::Age {
                    answer_key: "shortcut.getAgeAtHire.answer",
                    years: employee::get_age_at_hire(&found),
                    employee: found,
                }
            }
            Self::IncreaseSalary(RaiseParams { percent, min_years }) => ShortcutOutcome::Employees(
                employee::increase_salary_for_long_term_employees_as_of(
                    db,
                    Some(percent),
                    Some(min_years),
                    today,
                )
                .await?,
            ),
        };
        Ok(outcome)
    }
}

/// The shortcut menu, value field and find button as one command object.
#[derive(Debug, Clone, Default)]
pub struct ShortcutPanel {
    selected: Option<Shortcut>,
    input: String,
}

impl ShortcutPanel {
    /// An empty panel with nothing selected and the value field disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a shortcut and clears the value field.
    pub fn select(&mut self, shortcut: Shortcut) {
        debug!(?shortcut, "Updating value field state");
        self.selected = Some(shortcut);
        self.input.clear();
    }

    /// Currently selected shortcut.
    #[must_use]
    pub const fn selected(&self) -> Option<Shortcut> {
        self.selected
    }

    /// Prompt key for the value field, if the selection takes input.
    #[must_use]
    pub fn prompt_key(&self) -> Option<&'static str> {
        self.selected.and_then(Shortcut::prompt_key)
    }

    /// Whether the value field currently accepts text.
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.selected.is_some_and(|s| !s.input_disabled())
    }

    /// Replaces the value field text. Ignored while the field is disabled.
    pub fn set_input(&mut self, text: &str) {
        if self.input_enabled() {
            text.clone_into(&mut self.input);
        }
    }

    /// Current value field text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Runs the selected shortcut on the current field text, as of `today`.
    ///
    /// Returns `Ok(None)` when nothing is selected or the text does not parse; in
    /// both cases the store is not called.
    ///
    /// # Errors
    /// Whatever the underlying request returns.
    pub async fn find_as_of(
        &self,
        db: &DatabaseConnection,
        today: NaiveDate,
    ) -> Result<Option<ShortcutOutcome>> {
        let Some(shortcut) = self.selected else {
            warn!("Find pressed with no shortcut selected");
            return Ok(None);
        };
        let Some(request) = shortcut.parse(&self.input) else {
            warn!(?shortcut, input = %self.input, "Shortcut aborted on unparsable input");
            return Ok(None);
        };

        let outcome = request.execute(db, today).await?;
        if let ShortcutOutcome::Employees(ref employees) = outcome {
            info!(?shortcut, "Shortcut found {} employees", employees.len());
        }
        Ok(Some(outcome))
    }

    /// Runs the selected shortcut as of the current date.
    ///
    /// # Errors
    /// Whatever the underlying request returns.
    pub async fn find(&self, db: &DatabaseConnection) -> Result<Option<ShortcutOutcome>> {
        self.find_as_of(db, age::today()).await
    }
}
