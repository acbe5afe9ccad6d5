//! Expense service
//!
//! Provides business logic for expense management: creating, updating,
//! deleting and listing expenses, and resolving user-typed identifiers.

use chrono::{DateTime, Utc};

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, Money};
use crate::storage::Storage;

use super::budget::{BudgetService, Overspend};
use super::report::total_amount;

/// Shortest ID prefix accepted when looking up an expense
pub const MIN_ID_PREFIX_LEN: usize = 4;

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub description: String,
    pub amount: Money,
    pub category: Option<String>,
}

/// Fields to change on an existing expense; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<String>,
}

/// A newly created expense, plus any budget overrun it caused
#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub expense: Expense,
    pub overspend: Option<Overspend>,
}

/// Treat empty or whitespace-only text as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense dated now
    pub fn create(&self, input: CreateExpenseInput) -> ExpenseResult<AddOutcome> {
        self.create_at(input, Utc::now())
    }

    /// Record a new expense dated `at`, then check that month's budget
    pub fn create_at(
        &self,
        input: CreateExpenseInput,
        at: DateTime<Utc>,
    ) -> ExpenseResult<AddOutcome> {
        let expense = Expense::at(input.description, input.amount, non_empty(input.category), at);

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        self.ensure_total_fits(None, expense.amount)?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        let overspend = BudgetService::new(self.storage).check_overspend(at)?;

        Ok(AddOutcome { expense, overspend })
    }

    /// Reject an amount that would push the all-time total out of range
    ///
    /// Every month's total is bounded by the all-time total, so summaries and
    /// the overspend check can always be computed afterwards.
    fn ensure_total_fits(&self, replacing: Option<&Expense>, amount: Money) -> ExpenseResult<()> {
        let others: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| replacing.map_or(true, |r| r.id != e.id))
            .collect();

        total_amount(&others)?
            .checked_add(amount)
            .map(|_| ())
            .ok_or_else(ExpenseError::total_overflow)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or unique ID prefix
    ///
    /// Returns `Ok(None)` when nothing matches and a validation error when a
    /// prefix matches more than one expense.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.get(id);
        }

        let prefix = identifier.trim();
        if prefix.len() < MIN_ID_PREFIX_LEN {
            return Ok(None);
        }

        let ids = self.storage.expenses.find_ids_by_prefix(prefix)?;
        match ids.as_slice() {
            [] => Ok(None),
            [id] => self.get(*id),
            _ => Err(ExpenseError::Validation(format!(
                "Expense ID '{}' is ambiguous: it matches {} expenses",
                prefix,
                ids.len()
            ))),
        }
    }

    /// List expenses, optionally only those in exactly `category`
    pub fn list(&self, category: Option<&str>) -> ExpenseResult<Vec<Expense>> {
        match category {
            Some(category) => self.storage.expenses.get_by_category(category),
            None => self.storage.expenses.get_all(),
        }
    }

    /// Apply a partial update
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> ExpenseResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let before = expense.clone();

        if let Some(description) = non_empty(input.description) {
            expense.description = description;
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(category) = non_empty(input.category) {
            expense.category = Some(category);
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if expense == before {
            return Ok(expense);
        }
        if expense.amount != before.amount {
            self.ensure_total_fits(Some(&before), expense.amount)?;
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        let mut changes = Vec::new();
        if before.description != expense.description {
            changes.push(format!(
                "description: '{}' -> '{}'",
                before.description, expense.description
            ));
        }
        if before.amount != expense.amount {
            changes.push(format!("amount: {} -> {}", before.amount, expense.amount));
        }
        if before.category != expense.category {
            changes.push(format!(
                "category: {:?} -> {:?}",
                before.category, expense.category
            ));
        }

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
            Some(changes.join(", ")),
        )?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }
}
