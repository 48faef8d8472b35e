use dotenvy::dotenv;
use employee_desk::{
    bot,
    config::{database, settings},
    core::employee,
    errors::{Error, Result},
    i18n::{self, Localizer},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load config.toml
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {}", e))?;

    // 4. Open the database and make sure the table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed an empty table from config
    employee::seed_employees(&db, &app_settings.employees)
        .await
        .inspect_err(|e| error!("Failed to seed employees: {}", e))?;

    // 6. Pick the startup locale
    let system_locale = env::var("LANG").ok();
    let locale = i18n::default_locale(app_settings.locale.as_deref(), system_locale.as_deref());
    let localizer = Localizer::new(locale)?;

    // 7. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(&token, db, localizer).await
}
