//! Summary CLI command

use std::io::Write;

use crate::config::Preferences;
use crate::error::ExpenseResult;
use crate::models::Month;
use crate::services::{ReportService, SummaryScope};
use crate::storage::Storage;

/// Handle `summary`
///
/// With a month, totals that month of the current year; otherwise totals
/// everything.
pub fn handle_summary<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    out: &mut W,
    month: Option<&str>,
) -> ExpenseResult<()> {
    let month = month.map(str::parse::<Month>).transpose()?;

    let summary = ReportService::new(storage).summary(SummaryScope::for_month(month))?;

    writeln!(
        out,
        "Total expenses for {}: {}",
        summary.scope,
        summary.total.format_with_symbol(&prefs.currency_symbol)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StorePaths;
    use crate::models::{Expense, Money};
    use tempfile::TempDir;

    fn summarize(storage: &Storage, month: Option<&str>) -> ExpenseResult<String> {
        let mut out = Vec::new();
        handle_summary(storage, &Preferences::default(), &mut out, month)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_summary_of_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(StorePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(
            summarize(&storage, None).unwrap(),
            "Total expenses for all time: $0.00\n"
        );
    }

    #[test]
    fn test_summary_for_current_month() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(StorePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage
            .expenses
            .upsert(Expense::new("Rent", Money::from_cents(120000), None))
            .unwrap();

        let month = Month::current();
        let output = summarize(&storage, Some(&month.number().to_string())).unwrap();
        assert_eq!(
            output,
            format!("Total expenses for {}: $1200.00\n", month.name())
        );
    }

    #[test]
    fn test_summary_rejects_bad_month() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(StorePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        for bad in ["0", "13", "May", "5.5", "-1"] {
            let err = summarize(&storage, Some(bad)).unwrap_err();
            assert_eq!(err.to_string(), "Month must be an integer between 1 and 12");
        }
    }
}
