//! Unified error types for the employee desk.
//!
//! Only `EmployeeNotFound` and `InvalidArgument` are meant to reach a caller as
//! business outcomes; everything else is infrastructure failure.

use sea_orm::DbErr;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment could not be read or understood
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the record store
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Lookup by identifier found no employee
    #[error("Employee with ID {id} not found.")]
    EmployeeNotFound {
        /// Identifier that was looked up
        id: i32,
    },

    /// A required operation argument was missing or unusable
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the offending argument
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting a reply failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
