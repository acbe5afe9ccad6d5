//! Expense model
//!
//! A single recorded purchase: what it was, how much it cost, an optional
//! category and when it happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Amount spent, always positive
    pub amount: Money,

    /// Optional free-form category, matched exactly when filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When the expense was recorded
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated now
    pub fn new(description: impl Into<String>, amount: Money, category: Option<String>) -> Self {
        Self::at(description, amount, category, Utc::now())
    }

    /// Create a new expense with an explicit date
    pub fn at(
        description: impl Into<String>,
        amount: Money,
        category: Option<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            category,
            date,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount < Money::MIN_AMOUNT {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be a number greater than $0.01"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_is_dated_now() {
        let before = Utc::now();
        let expense = Expense::new("Coffee", Money::from_cents(350), None);
        let after = Utc::now();

        assert!(expense.date >= before && expense.date <= after);
        assert_eq!(expense.description, "Coffee");
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let expense = Expense::new("Nothing", Money::zero(), None);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_serialization_omits_missing_category() {
        let expense = Expense::new("Misc", Money::from_cents(100), None);
        let json = serde_json::to_value(&expense).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["amount"], 100);

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }
}
