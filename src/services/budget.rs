//! Budget service
//!
//! Manages the per-month budget ceilings and the overspend check run after
//! every new expense.

use chrono::{DateTime, Datelike, Local, Utc};

use crate::audit::EntityType;
use crate::error::ExpenseResult;
use crate::models::{BudgetSettings, Money, Month};
use crate::storage::Storage;

use super::report::{ReportService, SummaryScope};

/// Spending beyond a month's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overspend {
    pub month: Month,
    pub budget: Money,
    pub spent: Money,
    /// `spent - budget`, always positive
    pub over: Money,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set or overwrite the budget for `month`
    ///
    /// Creates the settings record on first use.
    pub fn set_budget(&self, month: Month, amount: Money) -> ExpenseResult<BudgetSettings> {
        let existing = self.storage.settings.get()?;
        let before = existing.clone().unwrap_or_default();

        let mut settings = before.clone();
        let previous = settings.set_budget(month, amount);

        self.storage.settings.put(settings.clone())?;
        self.storage.settings.save()?;

        let diff = format!(
            "{}: {} -> {}",
            month,
            previous.map_or_else(|| "none".to_string(), |m| m.to_string()),
            amount
        );
        match existing {
            None => self.storage.log_create(
                EntityType::BudgetSettings,
                settings.id.clone(),
                None,
                &settings,
            )?,
            Some(_) => self.storage.log_update(
                EntityType::BudgetSettings,
                settings.id.clone(),
                None,
                &before,
                &settings,
                Some(diff),
            )?,
        }

        Ok(settings)
    }

    /// Every month with a budget, in calendar order
    pub fn list_budgets(&self) -> ExpenseResult<Vec<(Month, Money)>> {
        Ok(self
            .storage
            .settings
            .get()?
            .map(|settings| settings.iter().collect())
            .unwrap_or_default())
    }

    /// Compare spending in the month containing `at` against its budget
    pub fn check_overspend(&self, at: DateTime<Utc>) -> ExpenseResult<Option<Overspend>> {
        let month = Month::of(at);
        let Some(settings) = self.storage.settings.get()? else {
            return Ok(None);
        };
        let Some(budget) = settings.budget_for(month) else {
            return Ok(None);
        };

        let scope = SummaryScope::Month {
            month,
            year: at.with_timezone(&Local).year(),
        };
        let spent = ReportService::new(self.storage).summary(scope)?.total;

        Ok(settings.overspend(month, spent).map(|over| Overspend {
            month,
            budget,
            spent,
            over,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::StorePaths;
    use crate::models::Expense;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn may_15() -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(2025, 5, 15, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_set_budget_creates_then_updates() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let may = Month::new(5).unwrap();

        service.set_budget(may, Money::from_cents(10000)).unwrap();
        assert!(temp_dir.path().join("settings.json").exists());
        service.set_budget(may, Money::from_cents(25000)).unwrap();

        assert_eq!(
            service.list_budgets().unwrap(),
            vec![(may, Money::from_cents(25000))]
        );

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("May: $100.00 -> $250.00")
        );
    }

    #[test]
    fn test_no_budget_means_no_warning() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .expenses
            .upsert(Expense::at("x", Money::from_cents(999999), None, may_15()))
            .unwrap();

        let result = BudgetService::new(&storage).check_overspend(may_15()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_overspend_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_budget(Month::new(5).unwrap(), Money::from_cents(10000))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::at("TV", Money::from_cents(15000), None, may_15()))
            .unwrap();

        let over = service.check_overspend(may_15()).unwrap().unwrap();
        assert_eq!(over.month.name(), "May");
        assert_eq!(over.over.to_string(), "$50.00");
        assert_eq!(over.spent.cents(), 15000);
    }

    #[test]
    fn test_spending_equal_to_budget_is_not_overspend() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service
            .set_budget(Month::new(5).unwrap(), Money::from_cents(10000))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::at("Rent", Money::from_cents(10000), None, may_15()))
            .unwrap();

        assert!(service.check_overspend(may_15()).unwrap().is_none());
    }
}
