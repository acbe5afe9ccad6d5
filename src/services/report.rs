//! Spending totals
//!
//! Sums expenses over all time or over one calendar month.

use std::fmt;

use chrono::{Datelike, Local};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money, Month};
use crate::storage::Storage;

/// Sum of the amounts of `expenses`
///
/// Fails rather than wrapping when the sum does not fit.
pub fn total_amount(expenses: &[Expense]) -> ExpenseResult<Money> {
    expenses
        .iter()
        .try_fold(Money::zero(), |total, e| total.checked_add(e.amount))
        .ok_or_else(ExpenseError::total_overflow)
}

/// Which expenses a summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryScope {
    AllTime,
    /// One month of the given year
    Month { month: Month, year: i32 },
}

impl SummaryScope {
    /// `month` of the current local year, or all time when `None`
    pub fn for_month(month: Option<Month>) -> Self {
        match month {
            Some(month) => Self::Month {
                month,
                year: Local::now().year(),
            },
            None => Self::AllTime,
        }
    }
}

impl fmt::Display for SummaryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryScope::AllTime => f.write_str("all time"),
            SummaryScope::Month { month, .. } => write!(f, "{}", month),
        }
    }
}

/// Result of a summary query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub scope: SummaryScope,
    pub total: Money,
    pub count: usize,
}

/// Service for spending reports
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Expenses covered by `scope`, oldest first
    pub fn expenses_in(&self, scope: SummaryScope) -> ExpenseResult<Vec<Expense>> {
        match scope {
            SummaryScope::AllTime => self.storage.expenses.get_all(),
            SummaryScope::Month { month, year } => {
                let (start, end) = month.date_range(year).ok_or_else(|| {
                    ExpenseError::Validation(format!("No such month: {} {}", month, year))
                })?;
                self.storage.expenses.get_by_date_range(start, end)
            }
        }
    }

    /// Total spent within `scope`
    pub fn summary(&self, scope: SummaryScope) -> ExpenseResult<Summary> {
        let expenses = self.expenses_in(scope)?;
        Ok(Summary {
            scope,
            total: total_amount(&expenses)?,
            count: expenses.len(),
        })
    }
}
