//! Plain-text rendering of employees for Discord replies.
//!
//! Tables go into a fenced code block so the columns line up in the client.

use crate::{
    core::{
        record::{DATE_FORMAT, Employee},
        shortcut::ShortcutOutcome,
        validation::FieldViolation,
    },
    i18n::Localizer,
};
use std::fmt::Write;

/// Rows shown before the table is cut short; keeps replies under Discord's 2000 chars.
pub const MAX_TABLE_ROWS: usize = 15;

/// Renders `employees` as an aligned table with localized headers.
#[must_use]
pub fn employee_table(localizer: &Localizer, employees: &[Employee]) -> String {
    if employees.is_empty() {
        return localizer.text("table.empty");
    }

    let header = [
        "ID".to_string(),
        localizer.text("lastNameColumn"),
        localizer.text("positionColumn"),
        localizer.text("birthDateColumn"),
        localizer.text("hireDateColumn"),
        localizer.text("departmentNumberColumn"),
        localizer.text("salaryColumn"),
    ];
    let rows: Vec<[String; 7]> = employees
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|e| {
            [
                e.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                e.last_name.clone(),
                e.position.clone(),
                e.birth_date.format(DATE_FORMAT).to_string(),
                e.hire_date.format(DATE_FORMAT).to_string(),
                e.department_number.to_string(),
                e.salary.to_string(),
            ]
        })
        .collect();

    let mut widths = header.each_ref().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("```\n");
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out.push_str("```\n");

    let hidden = employees.len().saturating_sub(MAX_TABLE_ROWS);
    if hidden > 0 {
        out.push_str(&localizer.localize("table.truncated", &[&hidden]));
        out.push('\n');
    }
    out.push_str(&localizer.localize("table.count", &[&employees.len()]));
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Renders a shortcut result.
#[must_use]
pub fn outcome(localizer: &Localizer, outcome: &ShortcutOutcome) -> String {
    match outcome {
        ShortcutOutcome::Employees(employees) => employee_table(localizer, employees),
        ShortcutOutcome::Age {
            answer_key,
            employee,
            years,
        } => {
            let answer = localizer.text(answer_key);
            let id = employee.id.unwrap_or_default();
            localizer.localize(
                "shortcut.ageAnswer",
                &[&answer, &employee.last_name, &id, years],
            )
        }
    }
}

/// Lists failed constraints under the localized "not saved" line.
#[must_use]
pub fn violations(localizer: &Localizer, violations: &[FieldViolation]) -> String {
    violations.iter().fold(
        localizer.text("employee.invalidFields"),
        |mut out, violation| {
            let _ = write!(out, "\n• {}: {}", violation.field, violation.message);
            out
        },
    )
}
