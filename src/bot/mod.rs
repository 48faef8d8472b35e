//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the employee desk: slash commands,
//! text rendering of employee tables, and the shared bot context.

/// Discord command implementations (employee, shortcut, language, general)
pub mod commands;
/// Plain-text rendering of employees and query results
pub mod render;

use crate::{
    core::shortcut::ShortcutPanel,
    errors::{Error, Result},
    i18n::{Locale, LocaleChangeListener, Localizer},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{
    collections::HashMap,
    fmt,
    sync::{PoisonError, RwLock},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Localization context; written only by `/language`
    pub localizer: RwLock<Localizer>,
    /// Shortcut panel of each user, keyed by Discord user id
    pub panels: Mutex<HashMap<u64, ShortcutPanel>>,
    /// Held while a shortcut query runs
    pub query_gate: Mutex<()>,
}

impl BotData {
    /// Creates a new `BotData` with no shortcut panels yet.
    #[must_use]
    pub fn new(database: DatabaseConnection, localizer: Localizer) -> Self {
        Self {
            database,
            localizer: RwLock::new(localizer),
            panels: Mutex::new(HashMap::new()),
            query_gate: Mutex::new(()),
        }
    }

    /// Runs `f` with the localizer borrowed; never hold the result across an await.
    pub fn with_localizer<R>(&self, f: impl FnOnce(&Localizer) -> R) -> R {
        f(&self.localizer.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Localizes `key` with positional arguments in the current locale.
    #[must_use]
    pub fn tr(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        self.with_localizer(|localizer| localizer.localize(key, args))
    }

    /// Switches the locale, or toggles it when `locale` is `None`.
    pub fn switch_locale(&self, locale: Option<Locale>) -> Locale {
        let mut localizer = self
            .localizer
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match locale {
            Some(locale) => {
                localizer.set_locale(locale);
                locale
            }
            None => localizer.toggle(),
        }
    }
}

/// Keeps the bot's custom status in the current language.
struct ActivityListener {
    ctx: serenity::Context,
    titles: HashMap<Locale, String>,
}

impl LocaleChangeListener for ActivityListener {
    fn locale_changed(&self, locale: Locale) {
        if let Some(title) = self.titles.get(&locale) {
            debug!(%locale, "Updating bot activity");
            self.ctx
                .set_activity(Some(serenity::ActivityData::custom(title.clone())));
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let reply = match &error {
                Error::EmployeeNotFound { id } => {
                    warn!("Command `{}`: {}", ctx.command().name, error);
                    ctx.data().tr("employee.notFound", &[id])
                }
                _ => {
                    error!("Error in command `{}`: {:?}", ctx.command().name, error);
                    ctx.data().tr("error.generic", &[&error])
                }
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and blocks until it stops.
///
/// # Errors
/// Returns `Framework` if the client cannot be built or the gateway connection fails.
#[instrument(skip_all)]
pub async fn run_bot(token: &str, database: DatabaseConnection, localizer: Localizer) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::employee(),
                commands::shortcut(),
                commands::language(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let mut localizer = localizer;
                let titles = Locale::SUPPORTED
                    .into_iter()
                    .map(|locale| (locale, localizer.localize_in(locale, "app.title", &[])))
                    .collect();
                let listener = ActivityListener {
                    ctx: ctx.clone(),
                    titles,
                };
                listener.locale_changed(localizer.locale());
                localizer.add_listener(Box::new(listener));

                Ok(BotData::new(database, localizer))
            })
        })
        .build();

    // Slash commands only need the unprivileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
