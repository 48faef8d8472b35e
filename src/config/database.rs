//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::Employee;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Fallback database location; `mode=rwc` creates the file on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/employees.sqlite?mode=rwc";

/// Gets the database URL from `DATABASE_URL` or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the directory holding a file-backed `SQLite` database; `rwc` only creates the file.
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(location) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = location.split('?').next().unwrap_or_default();
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!("Ensuring database directory {parent:?} exists");
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_parent_dir(&database_url)?;
    info!("Connecting to {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `employees` table unless it already exists.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut employee_table = schema.create_table_from_entity(Employee);
    employee_table.if_not_exists();

    db.execute(builder.build(&employee_table)).await?;

    Ok(())
}
