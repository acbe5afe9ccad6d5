//! Export CLI command
//!
//! Writes every stored expense to a CSV file.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::export_expenses_csv;
use crate::storage::Storage;

/// Handle `export`
///
/// The file name is checked before anything is read or created.
pub fn handle_export<W: Write>(storage: &Storage, out: &mut W, file: &str) -> ExpenseResult<()> {
    if !file.ends_with(".csv") {
        return Err(ExpenseError::Validation(
            "Filename must end with .csv".into(),
        ));
    }

    let expenses = storage.expenses.get_all()?;
    if expenses.is_empty() {
        writeln!(out, "No expenses to export.")?;
        return Ok(());
    }

    let output = File::create(file).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", file, e))
    })?;
    let mut writer = BufWriter::new(output);

    let rows = export_expenses_csv(&expenses, &mut writer)?;
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", file, e)))?;

    log::debug!("Exported {} expenses to {}", rows, file);
    writeln!(out, "Expenses exported successfully to {}", file)?;
    Ok(())
}
