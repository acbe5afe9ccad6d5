//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging, and cross-record checks such as the
//! overspend warning.

pub mod budget;
pub mod expense;
pub mod report;

pub use budget::{BudgetService, Overspend};
pub use expense::{AddOutcome, CreateExpenseInput, ExpenseService, UpdateExpenseInput};
pub use report::{total_amount, ReportService, Summary, SummaryScope};
