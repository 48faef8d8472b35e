//! Employee query/update service.
//!
//! Every operation is a single request against the `employees` table. Age and
//! tenure filters are evaluated by the store with a whole-years expression that
//! matches `core::age::years_between`; functions that depend on the current date
//! have an `_as_of` form taking "today" explicitly.

use crate::{
    core::{
        age,
        record::{self, Employee},
        salary,
        validation,
    },
    config::settings::EmployeeSeed,
    entities::{Employee as EmployeeEntity, employee},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DbErr, PaginatorTrait, QueryOrder, QuerySelect, Select, TransactionTrait,
    Value,
    prelude::*,
    sea_query::{Expr, SimpleExpr},
};
use tracing::{debug, error, info, warn};

/// Largest number of rows returned by the salary extreme queries.
pub const SALARY_EXTREMES_LIMIT: u64 = 5;

/// Builds `<whole years from column to today> <op> <bound>` for SQLite.
///
/// Counts the same way as `age::years_between`, including the truncation toward
/// zero when `today` precedes the stored date.
fn years_since(column: &str, today: NaiveDate, op: &str, bound: i32) -> SimpleExpr {
    let today = Value::from(today.format(record::DATE_FORMAT).to_string());
    Expr::cust_with_values(
        format!(
            "(CAST(strftime('%Y', ?) AS INTEGER) - CAST(strftime('%Y', \"{column}\") AS INTEGER) \
             + CASE WHEN ? >= \"{column}\" \
               THEN -(strftime('%m-%d', ?) < strftime('%m-%d', \"{column}\")) \
               ELSE (strftime('%m-%d', \"{column}\") < strftime('%m-%d', ?)) END) {op} ?"
        ),
        [
            today.clone(),
            today.clone(),
            today.clone(),
            today,
            Value::from(bound),
        ],
    )
}

fn long_term_query(min_years: i32, today: NaiveDate) -> Select<EmployeeEntity> {
    EmployeeEntity::find()
        .filter(years_since("hire_date", today, ">=", min_years))
        .order_by_asc(employee::Column::Id)
}

fn into_employees(models: Vec<employee::Model>) -> Vec<Employee> {
    models.into_iter().map(Employee::from).collect()
}

/// Inserts a new employee (no id) or updates the existing row with the same id.
///
/// # Errors
/// `EmployeeNotFound` when updating an id the store does not know; store errors propagate.
pub async fn save_employee(db: &DatabaseConnection, employee: &Employee) -> Result<Employee> {
    debug!(employee = ?employee, "Saving employee");
    let active = employee.to_active_model()?;

    let saved = match employee.id {
        Some(id) => active.update(db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => Error::EmployeeNotFound { id },
            other => Error::Database(other),
        })?,
        None => active.insert(db).await?,
    };

    info!(id = saved.id, "Employee saved");
    Ok(saved.into())
}

/// Finds an employee by identifier.
///
/// # Errors
/// `EmployeeNotFound` if no row has this id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Employee> {
    debug!(id, "Finding employee by ID");
    EmployeeEntity::find_by_id(id)
        .one(db)
        .await?
        .map(Employee::from)
        .ok_or_else(|| {
            warn!(id, "Employee not found");
            Error::EmployeeNotFound { id }
        })
}

/// Deletes an employee by identifier.
///
/// Deleting an id that does not exist is a no-op, and store failures are logged
/// and swallowed: the caller always observes success.
pub async fn delete_employee(db: &DatabaseConnection, id: i32) {
    debug!(id, "Deleting employee");
    match EmployeeEntity::delete_by_id(id).exec(db).await {
        Ok(result) => info!(
            id,
            rows_affected = result.rows_affected,
            "Employee deleted successfully"
        ),
        Err(e) => error!(id, "Error deleting employee: {e}"),
    }
}

/// Returns every employee ordered by id.
pub async fn get_all_employees(db: &DatabaseConnection) -> Result<Vec<Employee>> {
    debug!("Retrieving all employees");
    let employees = into_employees(
        EmployeeEntity::find()
            .order_by_asc(employee::Column::Id)
            .all(db)
            .await?,
    );
    info!("Retrieved {} employees", employees.len());
    Ok(employees)
}

/// Number of stored employees.
pub async fn count_employees(db: &DatabaseConnection) -> Result<u64> {
    EmployeeEntity::find().count(db).await.map_err(Into::into)
}

/// Whole years between birth and hire. Negative if hired before being born.
#[must_use]
pub fn get_age_at_hire(employee: &Employee) -> i32 {
    let years = age::years_between(employee.birth_date, employee.hire_date);
    debug!(id = ?employee.id, years, "Calculated age at hire");
    years
}

/// Whole years between birth and `today`.
#[must_use]
pub fn get_age_as_of(employee: &Employee, today: NaiveDate) -> i32 {
    let years = age::years_between(employee.birth_date, today);
    debug!(id = ?employee.id, years, "Calculated age");
    years
}

/// Whole years between birth and the current date.
#[must_use]
pub fn get_current_age(employee: &Employee) -> i32 {
    get_age_as_of(employee, age::today())
}

/// Employees of `department` whose age is below `age`, as of `today`.
pub async fn get_employees_in_department_younger_than_as_of(
    db: &DatabaseConnection,
    department: i32,
    age: i32,
    today: NaiveDate,
) -> Result<Vec<Employee>> {
    debug!(department, age, "Finding employees in department younger than");
    let employees = into_employees(
        EmployeeEntity::find()
            .filter(employee::Column::DepartmentNumber.eq(department))
            .filter(years_since("birth_date", today, "<", age))
            .order_by_asc(employee::Column::Id)
            .all(db)
            .await?,
    );
    info!("Found {} employees", employees.len());
    Ok(employees)
}

/// Employees of `department` whose current age is below `age`.
pub async fn get_employees_in_department_younger_than(
    db: &DatabaseConnection,
    department: i32,
    age: i32,
) -> Result<Vec<Employee>> {
    get_employees_in_department_younger_than_as_of(db, department, age, age::today()).await
}

/// Up to five employees with the lowest salaries, lowest first.
pub async fn get_employees_with_min_salary(db: &DatabaseConnection) -> Result<Vec<Employee>> {
    debug!("Finding employees with minimum salary");
    let employees = into_employees(
        EmployeeEntity::find()
            .order_by_asc(employee::Column::SalaryCents)
            .order_by_asc(employee::Column::Id)
            .limit(SALARY_EXTREMES_LIMIT)
            .all(db)
            .await?,
    );
    info!("Found {} employees with minimum salary", employees.len());
    Ok(employees)
}

/// Up to five employees with the highest salaries, highest first.
pub async fn get_employees_with_max_salary(db: &DatabaseConnection) -> Result<Vec<Employee>> {
    debug!("Finding employees with maximum salary");
    let employees = into_employees(
        EmployeeEntity::find()
            .order_by_desc(employee::Column::SalaryCents)
            .order_by_asc(employee::Column::Id)
            .limit(SALARY_EXTREMES_LIMIT)
            .all(db)
            .await?,
    );
    info!("Found {} employees with maximum salary", employees.len());
    Ok(employees)
}

/// Employees hired at least `min_years` whole years before `today`.
pub async fn get_long_term_employees_as_of(
    db: &DatabaseConnection,
    min_years: i32,
    today: NaiveDate,
) -> Result<Vec<Employee>> {
    debug!(min_years, "Finding long-term employees");
    let employees = into_employees(long_term_query(min_years, today).all(db).await?);
    info!("Found {} long-term employees", employees.len());
    Ok(employees)
}

/// Employees hired at least `min_years` whole years ago.
pub async fn get_long_term_employees(
    db: &DatabaseConnection,
    min_years: i32,
) -> Result<Vec<Employee>> {
    get_long_term_employees_as_of(db, min_years, age::today()).await
}

/// Employees strictly older than `age` as of `today`.
pub async fn find_old_employees_as_of(
    db: &DatabaseConnection,
    age: i32,
    today: NaiveDate,
) -> Result<Vec<Employee>> {
    debug!(age, "Finding employees older than");
    let employees = into_employees(
        EmployeeEntity::find()
            .filter(years_since("birth_date", today, ">", age))
            .order_by_asc(employee::Column::Id)
            .all(db)
            .await?,
    );
    info!("Found {} employees older than {age}", employees.len());
    Ok(employees)
}

/// Employees strictly older than `age`.
pub async fn find_old_employees(db: &DatabaseConnection, age: i32) -> Result<Vec<Employee>> {
    find_old_employees_as_of(db, age, age::today()).await
}

/// Raises every employee with at least `min_years` of tenure (as of `today`) by
/// `percent`, truncating to whole cents, and returns the updated records.
///
/// All updates happen in one database transaction.
///
/// # Errors
/// `InvalidArgument` if either parameter is missing.
pub async fn increase_salary_for_long_term_employees_as_of(
    db: &DatabaseConnection,
    percent: Option<Decimal>,
    min_years: Option<i32>,
    today: NaiveDate,
) -> Result<Vec<Employee>> {
    debug!(?percent, ?min_years, "Increasing salary for long-term employees");
    let (Some(percent), Some(min_years)) = (percent, min_years) else {
        error!("Percentage increase and years worked cannot be missing");
        return Err(Error::InvalidArgument {
            message: "Percentage increase and years worked must not be missing".to_string(),
        });
    };

    let txn = db.begin().await?;
    let eligible = long_term_query(min_years, today).all(&txn).await?;
    info!("Found {} eligible employees", eligible.len());

    let mut raised = Vec::with_capacity(eligible.len());
    for model in eligible {
        let id = model.id;
        let new_salary = salary::apply_raise(salary::from_cents(model.salary_cents), percent);
        let mut active: employee::ActiveModel = model.into();
        active.salary_cents = sea_orm::Set(salary::to_cents(new_salary)?);
        let updated = active.update(&txn).await?;
        debug!(id, %new_salary, "Updated salary");
        raised.push(Employee::from(updated));
    }

    txn.commit().await?;
    Ok(raised)
}

/// Raises long-term employees as of the current date.
///
/// # Errors
/// `InvalidArgument` if either parameter is missing.
pub async fn increase_salary_for_long_term_employees(
    db: &DatabaseConnection,
    percent: Option<Decimal>,
    min_years: Option<i32>,
) -> Result<Vec<Employee>> {
    increase_salary_for_long_term_employees_as_of(db, percent, min_years, age::today()).await
}

/// Inserts the configured seed employees when the table is empty.
///
/// Seeds that fail to parse or validate are skipped with an error log.
/// Returns the number of inserted rows.
pub async fn seed_employees(db: &DatabaseConnection, seeds: &[EmployeeSeed]) -> Result<usize> {
    if seeds.is_empty() || count_employees(db).await? > 0 {
        debug!("Skipping employee seeding");
        return Ok(0);
    }

    let mut inserted = 0;
    for seed in seeds {
        let Some(employee) = seed.form().parse() else {
            error!(last_name = %seed.last_name, "Seed employee has malformed fields");
            continue;
        };
        if let Err(violations) = validation::check(&employee) {
            error!(last_name = %seed.last_name, ?violations, "Seed employee is invalid");
            continue;
        }
        save_employee(db, &employee).await?;
        inserted += 1;
    }

    info!("Seeded {inserted} employees");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::record::from_text, test_utils::*};
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ids(employees: &[Employee]) -> Vec<i32> {
        employees.iter().filter_map(|e| e.id).collect()
    }

    const TODAY: (i32, u32, u32) = (2024, 11, 25);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[tokio::test]
    async fn test_store_years_match_calendar_years() -> Result<()> {
        let db = setup_test_db().await?;
        let as_of = date(2024, 3, 1);
        let births = [
            "2000-03-01",
            "2000-03-02",
            "2000-02-29",
            "2023-03-02",
            "2024-03-01",
            "2024-06-01",
            "2025-02-28",
            "2034-03-02",
            "2034-02-28",
        ];
        for birth in births {
            create_custom_employee(&db, birth, birth, "2020-01-01", 1, "100").await?;
        }

        for birth in births {
            let expected = age::years_between(NaiveDate::from_str(birth).unwrap(), as_of);
            let named = |employees: Vec<Employee>| employees.iter().any(|e| e.last_name == birth);
            assert!(
                named(find_old_employees_as_of(&db, expected - 1, as_of).await?),
                "{birth}: store counts fewer than {expected} years"
            );
            assert!(
                !named(find_old_employees_as_of(&db, expected, as_of).await?),
                "{birth}: store counts more than {expected} years"
            );
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_find_returns_it() -> Result<()> {
        let db = setup_test_db().await?;

        let saved = create_test_employee(&db, "Doe").await?;
        assert!(saved.id.is_some());

        let found = find_by_id(&db, saved.id.unwrap()).await?;
        assert_eq!(found, saved);
        assert_eq!(found.salary.to_string(), "50000.00");
        Ok(())
    }

    #[tokio::test]
    async fn test_save_with_id_updates_in_place() -> Result<()> {
        let db = setup_test_db().await?;
        let original = create_test_employee(&db, "Doe").await?;

        let edited = from_text("Roe", "Lead", "1991-02-02", "2021-03-03", "2", "70000.10").unwrap();
        let merged = record::merge(&original, edited);
        let saved = save_employee(&db, &merged).await?;

        assert_eq!(saved.id, original.id);
        assert_eq!(get_all_employees(&db).await?.len(), 1);
        let found = find_by_id(&db, original.id.unwrap()).await?;
        assert_eq!(found.last_name, "Roe");
        assert_eq!(found.salary, dec("70000.10"));
        Ok(())
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let ghost = Employee {
            id: Some(404),
            ..test_employee("Ghost")
        };
        let result = save_employee(&db, &ghost).await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = find_by_id(&db, 999).await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let saved = create_test_employee(&db, "Doe").await?;
        let id = saved.id.unwrap();

        delete_employee(&db, id).await;
        delete_employee(&db, id).await;
        delete_employee(&db, 12345).await;

        assert!(matches!(
            find_by_id(&db, id).await,
            Err(Error::EmployeeNotFound { .. })
        ));
        assert!(get_all_employees(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_orders_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_employee(&db, "Zeta").await?;
        let b = create_test_employee(&db, "Alpha").await?;

        let all = get_all_employees(&db).await?;
        assert_eq!(ids(&all), vec![a.id.unwrap(), b.id.unwrap()]);
        Ok(())
    }

    #[test]
    fn test_age_at_hire() {
        let employee = test_employee("Doe");
        assert_eq!(get_age_at_hire(&employee), 30);

        let odd = Employee {
            birth_date: date(2020, 1, 1),
            hire_date: date(1990, 1, 1),
            ..employee
        };
        assert_eq!(get_age_at_hire(&odd), -30);
    }

    #[test]
    fn test_age_as_of() {
        let employee = Employee {
            birth_date: date(1985, 1, 1),
            ..test_employee("Doe")
        };
        assert_eq!(get_age_as_of(&employee, today()), 39);
    }

    #[tokio::test]
    async fn test_salary_extremes_are_bounded_and_sorted() -> Result<()> {
        let db = setup_test_db().await?;
        let salaries = ["300", "100", "700", "500", "200", "600", "400"];
        for (i, s) in salaries.iter().enumerate() {
            create_custom_employee(&db, &format!("E{i}"), "1990-01-01", "2020-01-01", 1, s)
                .await?;
        }

        let min: Vec<Decimal> = get_employees_with_min_salary(&db)
            .await?
            .into_iter()
            .map(|e| e.salary)
            .collect();
        assert_eq!(min, ["100", "200", "300", "400", "500"].map(dec).to_vec());

        let max: Vec<Decimal> = get_employees_with_max_salary(&db)
            .await?
            .into_iter()
            .map(|e| e.salary)
            .collect();
        assert_eq!(max, ["700", "600", "500", "400", "300"].map(dec).to_vec());
        Ok(())
    }

    #[tokio::test]
    async fn test_salary_extremes_with_few_employees() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_employee(&db, "A", "1990-01-01", "2020-01-01", 1, "20").await?;
        create_custom_employee(&db, "B", "1990-01-01", "2020-01-01", 1, "10").await?;

        let min = get_employees_with_min_salary(&db).await?;
        assert_eq!(min.len(), 2);
        assert_eq!(min[0].last_name, "B");

        let max = get_employees_with_max_salary(&db).await?;
        assert_eq!(max.len(), 2);
        assert_eq!(max[0].last_name, "A");
        Ok(())
    }

    #[tokio::test]
    async fn test_younger_than_in_department() -> Result<()> {
        let db = setup_test_db().await?;
        let _old = create_custom_employee(&db, "Old", "1990-01-01", "2015-01-01", 1, "100").await?;
        let almost = create_custom_employee(&db, "Almost", "2000-11-26", "2020-01-01", 1, "100").await?;
        let _exact = create_custom_employee(&db, "Exact", "2000-11-25", "2020-01-01", 1, "100").await?;
        let _other = create_custom_employee(&db, "Other", "2003-01-01", "2022-01-01", 2, "100").await?;

        let found = get_employees_in_department_younger_than_as_of(&db, 1, 24, today()).await?;
        assert_eq!(ids(&found), vec![almost.id.unwrap()]);

        let none = get_employees_in_department_younger_than_as_of(&db, 3, 99, today()).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_older_than() -> Result<()> {
        let db = setup_test_db().await?;
        let senior = create_custom_employee(&db, "Senior", "1960-05-05", "1990-01-01", 1, "100").await?;
        let _birthday_tomorrow =
            create_custom_employee(&db, "Tomorrow", "1974-11-26", "2000-01-01", 1, "100").await?;
        let birthday_today =
            create_custom_employee(&db, "Today", "1974-11-25", "2000-01-01", 2, "100").await?;

        let found = find_old_employees_as_of(&db, 49, today()).await?;
        assert_eq!(ids(&found), vec![senior.id.unwrap(), birthday_today.id.unwrap()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_long_term_employees() -> Result<()> {
        let db = setup_test_db().await?;
        let veteran = create_custom_employee(&db, "Veteran", "1970-01-01", "2000-03-01", 1, "100").await?;
        let exactly_five =
            create_custom_employee(&db, "Five", "1980-01-01", "2019-11-25", 1, "100").await?;
        let _almost_five =
            create_custom_employee(&db, "Almost", "1980-01-01", "2019-11-26", 1, "100").await?;

        let found = get_long_term_employees_as_of(&db, 5, today()).await?;
        assert_eq!(ids(&found), vec![veteran.id.unwrap(), exactly_five.id.unwrap()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_increase_salary_for_long_term_employees() -> Result<()> {
        let db = setup_test_db().await?;
        let veteran =
            create_custom_employee(&db, "Veteran", "1970-01-01", "2010-01-01", 1, "50000.00").await?;
        let odd = create_custom_employee(&db, "Odd", "1970-01-01", "2012-01-01", 1, "33333.33").await?;
        let junior =
            create_custom_employee(&db, "Junior", "1999-01-01", "2023-01-01", 1, "40000.00").await?;

        let raised =
            increase_salary_for_long_term_employees_as_of(&db, Some(dec("10")), Some(5), today())
                .await?;
        assert_eq!(ids(&raised), vec![veteran.id.unwrap(), odd.id.unwrap()]);
        assert_eq!(raised[0].salary, dec("55000.00"));

        // Persisted, junior untouched
        assert_eq!(find_by_id(&db, veteran.id.unwrap()).await?.salary, dec("55000.00"));
        assert_eq!(find_by_id(&db, junior.id.unwrap()).await?.salary, dec("40000.00"));

        let raised =
            increase_salary_for_long_term_employees_as_of(&db, Some(dec("7")), Some(12), today())
                .await?;
        assert_eq!(ids(&raised), vec![veteran.id.unwrap(), odd.id.unwrap()]);
        // 36666.66 after the first raise, then * 1.07 = 39233.3262
        assert_eq!(find_by_id(&db, odd.id.unwrap()).await?.salary, dec("39233.32"));
        Ok(())
    }

    #[tokio::test]
    async fn test_increase_salary_truncates_to_cents() -> Result<()> {
        let db = setup_test_db().await?;
        let odd = create_custom_employee(&db, "Odd", "1970-01-01", "2012-01-01", 1, "33333.33").await?;

        let raised =
            increase_salary_for_long_term_employees_as_of(&db, Some(dec("7")), Some(5), today())
                .await?;
        assert_eq!(raised[0].salary, dec("35666.66"));
        assert_eq!(find_by_id(&db, odd.id.unwrap()).await?.salary, dec("35666.66"));
        Ok(())
    }

    #[tokio::test]
    async fn test_increase_salary_requires_arguments() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_employee(&db, "Doe").await?;

        let missing_percent =
            increase_salary_for_long_term_employees_as_of(&db, None, Some(1), today()).await;
        assert!(matches!(missing_percent, Err(Error::InvalidArgument { .. })));

        let missing_years =
            increase_salary_for_long_term_employees_as_of(&db, Some(dec("5")), None, today()).await;
        assert!(matches!(missing_years, Err(Error::InvalidArgument { .. })));

        let all = get_all_employees(&db).await?;
        assert_eq!(all[0].salary, dec("50000.00"));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_only_into_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        let seeds = vec![
            EmployeeSeed::from(&test_employee("Doe")),
            EmployeeSeed {
                salary: "not money".to_string(),
                ..EmployeeSeed::from(&test_employee("Broken"))
            },
            EmployeeSeed {
                last_name: " ".to_string(),
                ..EmployeeSeed::from(&test_employee("Blank"))
            },
        ];

        assert_eq!(seed_employees(&db, &seeds).await?, 1);
        assert_eq!(seed_employees(&db, &seeds).await?, 0);
        assert_eq!(count_employees(&db).await?, 1);
        Ok(())
    }
}
