//! `config` command: where the data lives and how it is shown

use std::io::Write;
use std::path::Path;

use crate::config::Preferences;
use crate::error::ExpenseResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Audit entries shown under "Recent activity"
const RECENT_ACTIVITY: usize = 5;

fn file_status(path: &Path) -> &'static str {
    if path.exists() {
        "present"
    } else {
        "not yet created"
    }
}

/// Handle `config`; any option given is validated and saved before the report
pub fn handle_config<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    out: &mut W,
    currency_symbol: Option<String>,
    date_format: Option<String>,
) -> ExpenseResult<()> {
    let paths = storage.paths();

    let updated;
    let prefs = if currency_symbol.is_some() || date_format.is_some() {
        let mut changed = prefs.clone();
        if let Some(symbol) = currency_symbol {
            changed.currency_symbol = symbol;
        }
        if let Some(format) = date_format {
            changed.date_format = format;
        }
        changed.save(paths)?;
        log::info!("Saved preferences to {}", paths.config_file().display());
        writeln!(out, "Preferences updated")?;
        writeln!(out)?;
        updated = changed;
        &updated
    } else {
        prefs
    };

    writeln!(out, "Expense Tracker Configuration")?;
    writeln!(out, "=============================")?;
    writeln!(out, "Store directory: {}", paths.base_dir().display())?;
    writeln!(out)?;

    writeln!(out, "Files:")?;
    for (label, path) in [
        ("Expenses   ", paths.expenses_file()),
        ("Budgets    ", paths.settings_file()),
        ("Preferences", paths.config_file()),
        ("Audit log  ", paths.audit_log()),
    ] {
        writeln!(out, "  {}: {} ({})", label, path.display(), file_status(&path))?;
    }
    writeln!(out)?;

    writeln!(out, "Preferences:")?;
    writeln!(out, "  Currency symbol: {}", prefs.currency_symbol)?;
    writeln!(out, "  Date format:     {}", prefs.date_format)?;
    writeln!(out)?;

    let budgets = BudgetService::new(storage).list_budgets()?;
    if budgets.is_empty() {
        writeln!(out, "Budgets: none set")?;
    } else {
        writeln!(out, "Budgets:")?;
        for (month, amount) in budgets {
            writeln!(
                out,
                "  {:<10} {}",
                month.name(),
                amount.format_with_symbol(&prefs.currency_symbol)
            )?;
        }
    }

    let entries = storage.audit().read_all()?;
    if !entries.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent activity:")?;
        let skip = entries.len().saturating_sub(RECENT_ACTIVITY);
        for entry in entries.iter().skip(skip) {
            writeln!(out, "{}", entry.format_human_readable())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StorePaths;
    use crate::models::{Money, Month};
    use tempfile::TempDir;

    #[test]
    fn test_config_lists_paths_and_budgets() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(StorePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        BudgetService::new(&storage)
            .set_budget(Month::new(3).unwrap(), Money::from_cents(40000))
            .unwrap();
        let audit_before = storage.audit().read_all().unwrap().len();

        let mut out = Vec::new();
        handle_config(&storage, &Preferences::default(), &mut out, None, None).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains(&temp_dir.path().display().to_string()));
        assert!(output.contains("Currency symbol: $"));
        assert!(output.contains("March"));
        assert!(output.contains("$400.00"));
        assert!(output.contains("Recent activity:"));
        assert!(output.contains("CREATE"));
        assert_eq!(storage.audit().read_all().unwrap().len(), audit_before);
        assert!(!storage.paths().config_file().exists());
    }

    #[test]
    fn test_config_saves_new_preferences() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths.clone()).unwrap();

        let mut out = Vec::new();
        handle_config(
            &storage,
            &Preferences::default(),
            &mut out,
            Some("€".into()),
            Some("%Y-%m-%d".into()),
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Preferences updated\n"));
        assert!(output.contains("Currency symbol: €"));
        assert!(output.contains("Date format:     %Y-%m-%d"));

        let loaded = Preferences::load_or_default(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_config_rejects_bad_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(StorePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        let mut out = Vec::new();
        let err = handle_config(
            &storage,
            &Preferences::default(),
            &mut out,
            None,
            Some("%Q".into()),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Invalid date format '%Q'");
        assert!(out.is_empty());
        assert!(!storage.paths().config_file().exists());
    }
}
