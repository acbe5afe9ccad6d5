//! Expense Tracker - command-line personal finance tracking
//!
//! This library provides the core functionality for the `expense-tracker`
//! binary: recording expenses, setting monthly budgets, warning when a month
//! goes over budget, summarizing spending and exporting everything to CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Store location and display preferences
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, money, months, budget settings)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Table formatting for terminal output
//! - `export`: CSV export
//! - `cli`: Command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::StorePaths;
//! use expense_tracker::storage::Storage;
//!
//! let storage = Storage::open(StorePaths::new()?)?;
//! let expenses = storage.expenses.get_all()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
