//! Entity module - SeaORM entity definitions for the record store.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee;

pub use employee::{Entity as Employee, Model as EmployeeModel};
