//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDate};

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of expenses.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a category index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category -> expense ids
    by_category: RwLock<HashMap<String, Vec<ExpenseId>>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, ExpenseError> {
    lock.read()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, ExpenseError> {
    lock.write()
        .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Oldest first; ties broken by id so output is stable
fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the category index
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = write(&self.data)?;
        let mut by_category = write(&self.by_category)?;
        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            if let Some(category) = &expense.category {
                by_category.entry(category.clone()).or_default().push(expense.id);
            }
            data.insert(expense.id, expense);
        }

        log::debug!("loaded {} expenses from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let mut expenses: Vec<_> = read(&self.data)?.values().cloned().collect();
        sort_by_date(&mut expenses);

        log::debug!("saving {} expenses to {}", expenses.len(), self.path.display());
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        Ok(read(&self.data)?.get(&id).cloned())
    }

    /// Get all expenses, oldest first
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses: Vec<_> = read(&self.data)?.values().cloned().collect();
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Get expenses whose category is exactly `category`
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Expense>, ExpenseError> {
        let data = read(&self.data)?;
        let by_category = read(&self.by_category)?;

        let ids = by_category.get(category).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    /// Get expenses dated between `start` and `end` inclusive, in local time
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|e| {
                let day = e.date.with_timezone(&Local).date_naive();
                day >= start && day <= end
            })
            .collect())
    }

    /// IDs starting with `prefix`
    pub fn find_ids_by_prefix(&self, prefix: &str) -> Result<Vec<ExpenseId>, ExpenseError> {
        let mut ids: Vec<_> = read(&self.data)?
            .keys()
            .filter(|id| id.matches_prefix(prefix))
            .copied()
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = write(&self.data)?;
        let mut by_category = write(&self.by_category)?;

        if let Some(old_category) = data.get(&expense.id).and_then(|old| old.category.as_ref()) {
            if let Some(ids) = by_category.get_mut(old_category) {
                ids.retain(|&id| id != expense.id);
            }
        }

        if let Some(category) = &expense.category {
            by_category.entry(category.clone()).or_default().push(expense.id);
        }

        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let mut data = write(&self.data)?;
        let mut by_category = write(&self.by_category)?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(category) = &expense.category {
                    if let Some(ids) = by_category.get_mut(category) {
                        ids.retain(|&other| other != id);
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        Ok(read(&self.data)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn local(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new("Coffee", Money::from_cents(350), None);
        let id = expense.id;

        repo.upsert(expense).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 350);
    }

    #[test]
    fn test_category_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        let mut expense = Expense::new("Lunch", Money::from_cents(1200), Some("Food".into()));
        let id = expense.id;
        repo.upsert(expense.clone()).unwrap();
        repo.upsert(Expense::new("Bus", Money::from_cents(275), Some("Travel".into())))
            .unwrap();

        assert_eq!(repo.get_by_category("Food").unwrap().len(), 1);

        expense.category = Some("Work".into());
        repo.upsert(expense).unwrap();

        assert!(repo.get_by_category("Food").unwrap().is_empty());
        assert_eq!(repo.get_by_category("Work").unwrap()[0].id, id);
        assert!(repo.get_by_category("work").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let expense = Expense::new("Books", Money::from_cents(4599), Some("Education".into()));
        let id = expense.id;

        repo.upsert(expense).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 4599);
        assert_eq!(repo2.get_by_category("Education").unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new("Gym", Money::from_cents(3000), Some("Health".into()));
        let id = expense.id;
        repo.upsert(expense).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_by_category("Health").unwrap().is_empty());
    }

    #[test]
    fn test_ordering_and_date_range() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Expense::at("c", Money::from_cents(300), None, local(2025, 1, 20)))
            .unwrap();
        repo.upsert(Expense::at("a", Money::from_cents(100), None, local(2025, 1, 10)))
            .unwrap();
        repo.upsert(Expense::at("b", Money::from_cents(200), None, local(2025, 1, 15)))
            .unwrap();

        let all: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.description).collect();
        assert_eq!(all, vec!["a", "b", "c"]);

        let range = repo
            .get_by_date_range(
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            )
            .unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[1].amount.cents(), 200);
    }

    #[test]
    fn test_find_ids_by_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let expense = Expense::new("Tea", Money::from_cents(200), None);
        let id = expense.id;
        repo.upsert(expense).unwrap();

        assert_eq!(repo.find_ids_by_prefix(&id.short()).unwrap(), vec![id]);
        assert_eq!(repo.find_ids_by_prefix(&id.to_string()).unwrap(), vec![id]);
    }
}
