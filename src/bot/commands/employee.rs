//! Employee Discord commands - list, show, add, update and delete.
//!
//! Add and update take the same six text fields as the form; nothing reaches the
//! store unless the text parses and every constraint holds.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, render},
        core::{
            employee,
            record::{self, Employee, EmployeeForm},
            validation,
        },
        errors::{Error, Result},
    };
    use tracing::{debug, info};

    /// Parent command for managing employee records.
    #[poise::command(
        slash_command,
        subcommands(
            "employee_list",
            "employee_show",
            "employee_add",
            "employee_update",
            "employee_delete"
        )
    )]
    pub async fn employee(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = ctx.data().tr("help", &[]);
        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows every employee ordered by ID.
    #[poise::command(slash_command, rename = "list")]
    pub async fn employee_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let employees = employee::get_all_employees(&ctx.data().database).await?;
        let table = ctx
            .data()
            .with_localizer(|localizer| render::employee_table(localizer, &employees));
        ctx.say(table).await?;
        Ok(())
    }

    /// Shows one employee.
    #[poise::command(slash_command, rename = "show")]
    pub async fn employee_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID"] id: i32,
    ) -> Result<()> {
        let found = employee::find_by_id(&ctx.data().database, id).await?;
        let table = ctx
            .data()
            .with_localizer(|localizer| render::employee_table(localizer, &[found]));
        ctx.say(table).await?;
        Ok(())
    }

    /// Adds a new employee.
    #[poise::command(slash_command, rename = "add")]
    pub async fn employee_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Last name"] last_name: String,
        #[description = "Position"] position: String,
        #[description = "Date of birth (yyyy-MM-dd)"] birth_date: String,
        #[description = "Hire date (yyyy-MM-dd)"] hire_date: String,
        #[description = "Department number"] department_number: String,
        #[description = "Salary (e.g. 50000.00)"] salary: String,
    ) -> Result<()> {
        let form = EmployeeForm {
            last_name,
            position,
            birth_date,
            hire_date,
            department_number,
            salary,
        };
        let Some(new_employee) = checked(ctx, &form).await? else {
            return Ok(());
        };

        let saved = employee::save_employee(&ctx.data().database, &new_employee).await?;
        let id = saved.id.unwrap_or_default();
        info!(id, last_name = %saved.last_name, "Employee added");
        let reply = ctx.data().tr("employee.added", &[&saved.last_name, &id]);
        ctx.say(reply).await?;
        Ok(())
    }

    /// Changes an existing employee; omitted fields keep their stored value.
    #[poise::command(slash_command, rename = "update")]
    #[allow(clippy::too_many_arguments)]
    pub async fn employee_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID"] id: i32,
        #[description = "Last name"] last_name: Option<String>,
        #[description = "Position"] position: Option<String>,
        #[description = "Date of birth (yyyy-MM-dd)"] birth_date: Option<String>,
        #[description = "Hire date (yyyy-MM-dd)"] hire_date: Option<String>,
        #[description = "Department number"] department_number: Option<String>,
        #[description = "Salary (e.g. 50000.00)"] salary: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let original = employee::find_by_id(db, id).await?;

        let stored = EmployeeForm::from(&original);
        let form = EmployeeForm {
            last_name: last_name.unwrap_or(stored.last_name),
            position: position.unwrap_or(stored.position),
            birth_date: birth_date.unwrap_or(stored.birth_date),
            hire_date: hire_date.unwrap_or(stored.hire_date),
            department_number: department_number.unwrap_or(stored.department_number),
            salary: salary.unwrap_or(stored.salary),
        };
        debug!(id, ?form, "Update form pre-filled");

        let Some(updated) = checked(ctx, &form).await? else {
            return Ok(());
        };

        let saved = employee::save_employee(db, &record::merge(&original, updated)).await?;
        let reply = ctx.data().tr("employee.updated", &[&saved.last_name]);
        ctx.say(reply).await?;
        Ok(())
    }

    /// Removes an employee.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn employee_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID"] id: i32,
    ) -> Result<()> {
        employee::delete_employee(&ctx.data().database, id).await;
        let reply = ctx.data().tr("employee.deleted", &[&id]);
        ctx.say(reply).await?;
        Ok(())
    }

    /// Parses and validates the form, replying with the problem when it fails.
    async fn checked(
        ctx: poise::Context<'_, BotData, Error>,
        form: &EmployeeForm,
    ) -> Result<Option<Employee>> {
        let Some(parsed) = form.parse() else {
            let reply = ctx.data().tr("employee.invalidInput", &[]);
            ctx.say(reply).await?;
            return Ok(None);
        };
        if let Err(violations) = validation::check(&parsed) {
            let reply = ctx
                .data()
                .with_localizer(|localizer| render::violations(localizer, &violations));
            ctx.say(reply).await?;
            return Ok(None);
        }
        Ok(Some(parsed))
    }
}

pub use inner::*;
