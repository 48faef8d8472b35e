//! `/language` - switches the display language.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
        i18n::Locale,
    };
    use tracing::info;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum LanguageChoice {
        #[name = "English"]
        English,
        #[name = "Русский"]
        Russian,
    }

    impl From<LanguageChoice> for Locale {
        fn from(choice: LanguageChoice) -> Self {
            match choice {
                LanguageChoice::English => Self::EnglishGb,
                LanguageChoice::Russian => Self::Russian,
            }
        }
    }

    /// Switches the language; without an argument, toggles between English and Russian.
    #[poise::command(slash_command)]
    pub async fn language(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Language to switch to (toggles when omitted)"] language: Option<
            LanguageChoice,
        >,
    ) -> Result<()> {
        let locale = ctx.data().switch_locale(language.map(Locale::from));
        info!(%locale, user = %ctx.author().id, "Language switched");
        let reply = ctx.data().tr("language.changed", &[]);
        ctx.say(reply).await?;
        Ok(())
    }
}

pub use inner::*;
