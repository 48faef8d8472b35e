//! Shortcut Discord commands - pick a canned query, then run it with a value.
//!
//! Each user has their own panel. Only one query runs at a time across the bot.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        core::shortcut::{Shortcut, ShortcutPanel},
        errors::{Error, Result},
    };
    use tracing::{debug, warn};

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ShortcutChoice {
        #[name = "Employees in department younger than"]
        #[name_localized("ru", "Сотрудники отдела моложе")]
        FindYounger,
        #[name = "Lowest salaries"]
        #[name_localized("ru", "Самые низкие оклады")]
        MinSalary,
        #[name = "Highest salaries"]
        #[name_localized("ru", "Самые высокие оклады")]
        HighestSalary,
        #[name = "Working for at least N years"]
        #[name_localized("ru", "Работают не менее N лет")]
        WorkingSince,
        #[name = "Older than"]
        #[name_localized("ru", "Старше")]
        OlderThan,
        #[name = "Current age of employee"]
        #[name_localized("ru", "Текущий возраст сотрудника")]
        CurrentAge,
        #[name = "Age of employee when hired"]
        #[name_localized("ru", "Возраст сотрудника при найме")]
        AgeAtHire,
        #[name = "Raise salary of long-term employees"]
        #[name_localized("ru", "Повысить оклад опытным сотрудникам")]
        IncreaseSalary,
    }

    impl From<ShortcutChoice> for Shortcut {
        fn from(choice: ShortcutChoice) -> Self {
            match choice {
                ShortcutChoice::FindYounger => Self::FindYounger,
                ShortcutChoice::MinSalary => Self::MinSalary,
                ShortcutChoice::HighestSalary => Self::HighestSalary,
                ShortcutChoice::WorkingSince => Self::WorkingSince,
                ShortcutChoice::OlderThan => Self::OlderThan,
                ShortcutChoice::CurrentAge => Self::CurrentAge,
                ShortcutChoice::AgeAtHire => Self::AgeAtHire,
                ShortcutChoice::IncreaseSalary => Self::IncreaseSalary,
            }
        }
    }

    /// Parent command for canned queries.
    #[poise::command(slash_command, subcommands("shortcut_select", "shortcut_find"))]
    pub async fn shortcut(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = ctx.data().tr("help", &[]);
        ctx.say(help_text).await?;
        Ok(())
    }

    /// Picks the query that `/shortcut find` will run.
    #[poise::command(slash_command, rename = "select")]
    pub async fn shortcut_select(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Query to run"] query: ShortcutChoice,
    ) -> Result<()> {
        let shortcut = Shortcut::from(query);
        let user = ctx.author().id.get();
        ctx.data()
            .panels
            .lock()
            .await
            .entry(user)
            .or_insert_with(ShortcutPanel::new)
            .select(shortcut);
        debug!(user, ?shortcut, "Shortcut selected");

        let reply = ctx.data().with_localizer(|localizer| {
            let label = localizer.text(shortcut.label_key());
            let hint = shortcut
                .prompt_key()
                .map_or_else(|| localizer.text("valueField.disabled"), |key| localizer.text(key));
            format!("{}\n{hint}", localizer.localize("shortcut.selected", &[&label]))
        });
        ctx.say(reply).await?;
        Ok(())
    }

    /// Runs the selected query on `value`.
    #[poise::command(slash_command, rename = "find")]
    pub async fn shortcut_find(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Value for the query, e.g. 1:25"] value: Option<String>,
    ) -> Result<()> {
        let reply = find_reply(ctx.data(), ctx.author().id.get(), value.as_deref()).await?;
        ctx.say(reply).await?;
        Ok(())
    }

    /// Runs `user`'s selected shortcut on `value` and renders the answer.
    ///
    /// Refuses with the busy text while another query holds the gate.
    pub async fn find_reply(data: &BotData, user: u64, value: Option<&str>) -> Result<String> {
        let Ok(_running) = data.query_gate.try_lock() else {
            warn!(user, "Shortcut refused, another query is running");
            return Ok(data.tr("shortcut.busy", &[]));
        };

        let panel = data.panels.lock().await.get_mut(&user).map(|panel| {
            panel.set_input(value.unwrap_or_default());
            panel.clone()
        });
        let Some(panel) = panel else {
            return Ok(data.tr("valueField.noSelection", &[]));
        };

        let reply = match panel.find(&data.database).await? {
            Some(outcome) => data.with_localizer(|localizer| render::outcome(localizer, &outcome)),
            None => data.tr("shortcut.noResult", &[]),
        };
        Ok(reply)
    }
}

pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        bot::BotData,
        core::shortcut::{Shortcut, ShortcutPanel},
        errors::Result,
        i18n::{Locale, Localizer},
        test_utils::{create_test_employee, setup_test_db},
    };
    use poise::ChoiceParameter;

    const USER: u64 = 42;

    async fn bot_data() -> Result<BotData> {
        Ok(BotData::new(setup_test_db().await?, Localizer::new(Locale::EnglishGb)?))
    }

    async fn select(data: &BotData, shortcut: Shortcut) {
        data.panels
            .lock()
            .await
            .entry(USER)
            .or_insert_with(ShortcutPanel::new)
            .select(shortcut);
    }

    #[test]
    fn test_choice_names_follow_both_bundles() {
        let english = Localizer::new(Locale::EnglishGb).unwrap();
        let mut seen = 0;
        while let Some(choice) = ShortcutChoice::from_index(seen) {
            let label_key = Shortcut::from(choice).label_key();
            assert_eq!(choice.name(), english.text(label_key));
            assert_eq!(
                choice.localized_name("ru").map(str::to_string),
                Some(english.localize_in(Locale::Russian, label_key, &[]))
            );
            seen += 1;
        }
        assert_eq!(seen, Shortcut::ALL.len());
    }

    #[tokio::test]
    async fn test_second_query_is_refused_while_one_runs() -> Result<()> {
        let data = bot_data().await?;
        create_test_employee(&data.database, "Doe").await?;
        select(&data, Shortcut::MinSalary).await;

        let running = data.query_gate.try_lock().unwrap();
        let refused = find_reply(&data, USER, None).await?;
        assert_eq!(refused, "A query is already running, please wait.");

        drop(running);
        let answered = find_reply(&data, USER, None).await?;
        assert!(answered.contains("Doe"));
        assert!(answered.ends_with("1 employee(s)"));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_without_selection() -> Result<()> {
        let data = bot_data().await?;
        let reply = find_reply(&data, USER, Some("30")).await?;
        assert_eq!(reply, "Select a shortcut first.");
        Ok(())
    }

    #[tokio::test]
    async fn test_unparsable_value_finds_nothing() -> Result<()> {
        let data = bot_data().await?;
        select(&data, Shortcut::FindYounger).await;
        let reply = find_reply(&data, USER, Some("abc")).await?;
        assert_eq!(reply, "Nothing found for that value.");
        Ok(())
    }
}
