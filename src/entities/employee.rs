//! Employee entity - one row per person on the payroll.
//!
//! Salaries are stored as integer cents so the store never rounds them; the
//! domain layer (`core::record`) turns them back into exact decimals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Store-assigned identifier, immutable after creation
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Family name
    pub last_name: String,
    /// Job title
    pub position: String,
    /// Date of birth
    pub birth_date: Date,
    /// First working day
    pub hire_date: Date,
    /// Department the employee belongs to
    pub department_number: i32,
    /// Salary in cents
    pub salary_cents: i64,
}

/// Employees stand alone; there are no related tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
