//! CSV export of expenses
//!
//! One header row followed by one row per expense, columns in stored field
//! order: `id,description,amount,category,date`.

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::Expense;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    id: String,
    description: &'a str,
    amount: String,
    category: &'a str,
    date: String,
}

impl<'a> From<&'a Expense> for ExpenseRecord<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            description: &expense.description,
            amount: expense.amount.format_plain(),
            category: expense.category.as_deref().unwrap_or(""),
            date: expense.date.to_rfc3339(),
        }
    }
}

/// Write `expenses` as CSV, returning the number of rows written
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for expense in expenses {
        csv_writer.serialize(ExpenseRecord::from(expense))?;
    }

    csv_writer.flush()?;
    Ok(expenses.len())
}
