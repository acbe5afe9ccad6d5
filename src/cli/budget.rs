//! Budget CLI commands

use std::io::Write;

use crate::config::Preferences;
use crate::error::ExpenseResult;
use crate::models::Month;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_amount;

/// Handle `set-budget`
pub fn handle_set_budget<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    out: &mut W,
    month: &str,
    amount: &str,
) -> ExpenseResult<()> {
    let month: Month = month.parse()?;
    let amount = parse_amount(amount)?;

    BudgetService::new(storage).set_budget(month, amount)?;

    writeln!(
        out,
        "Budget for {} set to {}",
        month,
        amount.format_with_symbol(&prefs.currency_symbol)
    )?;
    Ok(())
}
