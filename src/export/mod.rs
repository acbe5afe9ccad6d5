//! Export module
//!
//! Writes stored expenses to spreadsheet-compatible CSV.

pub mod csv;

pub use self::csv::export_expenses_csv;
