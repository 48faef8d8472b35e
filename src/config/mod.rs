/// Database configuration and connection management
pub mod database;

/// Settings loading from config.toml
pub mod settings;
