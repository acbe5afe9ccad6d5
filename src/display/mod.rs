//! Display formatting for terminal output

pub mod expense;

pub use expense::{format_date, format_expense_table, NO_CATEGORY};
