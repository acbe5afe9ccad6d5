//! Core data models for the expense tracker
//!
//! Expenses, the budget settings record, and the value types they are built
//! from.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use budget::{BudgetSettings, GLOBAL_SETTINGS_ID};
pub use expense::{Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::Month;
