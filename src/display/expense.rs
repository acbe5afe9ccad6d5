//! Expense display formatting
//!
//! Renders expenses as a terminal table using the user's currency symbol and
//! date format.

use std::fmt::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::{Preferences, DEFAULT_DATE_FORMAT};
use crate::models::Expense;

/// Shown in the category column when an expense has none
pub const NO_CATEGORY: &str = "no-category";

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl ExpenseRow {
    fn new(expense: &Expense, prefs: &Preferences) -> Self {
        Self {
            id: expense.id.short(),
            date: format_date(expense, prefs),
            description: expense.description.clone(),
            amount: expense.amount.format_with_symbol(&prefs.currency_symbol),
            category: expense
                .category
                .clone()
                .unwrap_or_else(|| NO_CATEGORY.to_string()),
        }
    }
}

/// Expense date in local time, using the configured format
///
/// Falls back to the default format when the configured one can't be rendered.
pub fn format_date(expense: &Expense, prefs: &Preferences) -> String {
    let local = expense.date.with_timezone(&chrono::Local);

    let mut formatted = String::new();
    if write!(formatted, "{}", local.format(&prefs.date_format)).is_ok() {
        return formatted;
    }

    log::warn!("invalid date format '{}', using default", prefs.date_format);
    local.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Format a list of expenses as a table
pub fn format_expense_table(expenses: &[Expense], prefs: &Preferences) -> String {
    if expenses.is_empty() {
        return "No expenses to display.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow::new(e, prefs));
    Table::new(rows).with(Style::modern()).to_string()
}
