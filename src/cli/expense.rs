//! Expense CLI commands
//!
//! Implements `add`, `update`, `delete` and `list`.

use std::io::Write;

use crate::config::Preferences;
use crate::display::format_expense_table;
use crate::error::ExpenseResult;
use crate::services::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

use super::confirm::Confirm;
use super::parse_amount;

const NOT_FOUND: &str = "Expense not found";

/// Handle `add`
pub fn handle_add<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    out: &mut W,
    description: String,
    amount: &str,
    category: Option<String>,
) -> ExpenseResult<()> {
    let amount = parse_amount(amount)?;

    let outcome = ExpenseService::new(storage).create(CreateExpenseInput {
        description,
        amount,
        category,
    })?;

    writeln!(out, "Expense added successfully (ID: {})", outcome.expense.id)?;

    if let Some(over) = outcome.overspend {
        writeln!(
            out,
            "Warning: You have exceeded your budget for {} by {}",
            over.month,
            over.over.format_with_symbol(&prefs.currency_symbol)
        )?;
    }

    Ok(())
}

/// Handle `update`
pub fn handle_update<W: Write>(
    storage: &Storage,
    out: &mut W,
    id: &str,
    description: Option<String>,
    amount: Option<&str>,
    category: Option<String>,
) -> ExpenseResult<()> {
    let amount = amount
        .filter(|a| !a.trim().is_empty())
        .map(parse_amount)
        .transpose()?;

    let service = ExpenseService::new(storage);
    let Some(existing) = service.find(id)? else {
        writeln!(out, "{}", NOT_FOUND)?;
        return Ok(());
    };

    let updated = service.update(
        existing.id,
        UpdateExpenseInput {
            description,
            amount,
            category,
        },
    )?;

    writeln!(out, "Expense updated successfully (ID: {})", updated.id)?;
    Ok(())
}

/// Handle `delete`, asking for confirmation first
pub fn handle_delete<W: Write>(
    storage: &Storage,
    confirm: &mut dyn Confirm,
    out: &mut W,
    id: &str,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let Some(expense) = service.find(id)? else {
        writeln!(out, "{}", NOT_FOUND)?;
        return Ok(());
    };

    // Flush anything already written so it lands before the prompt
    out.flush()?;

    let prompt = format!(
        "Are you sure you want to delete expense (ID: {})? (yes/no): ",
        expense.id
    );
    if !confirm.confirm(&prompt)? {
        writeln!(out, "Deletion cancelled")?;
        return Ok(());
    }

    service.delete(expense.id)?;
    writeln!(out, "Expense deleted successfully")?;
    Ok(())
}

/// Handle `list`
pub fn handle_list<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    out: &mut W,
    category: Option<&str>,
) -> ExpenseResult<()> {
    let expenses = ExpenseService::new(storage).list(category)?;
    writeln!(out, "{}", format_expense_table(&expenses, prefs))?;
    Ok(())
}
