//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer. Handlers write their output to
//! the writer they are given rather than straight to stdout.

pub mod budget;
pub mod config;
pub mod confirm;
pub mod expense;
pub mod export;
pub mod report;

use std::io::Write;

use clap::Subcommand;

use crate::config::Preferences;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::storage::Storage;

pub use confirm::{AutoConfirm, Confirm, PromptConfirm};

/// Top-level subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add an expense with a description and amount
    Add {
        /// Description of the expense
        #[arg(short, long)]
        description: String,
        /// Amount of the expense
        #[arg(short, long)]
        amount: String,
        /// Category of the expense
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Update an existing expense
    Update {
        /// ID of the expense to update (full ID or the short form from `list`)
        #[arg(long)]
        id: String,
        /// New description of the expense
        #[arg(short, long)]
        description: Option<String>,
        /// New amount of the expense
        #[arg(short, long)]
        amount: Option<String>,
        /// New category of the expense
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// ID of the expense
        #[arg(long)]
        id: String,
    },

    /// View all expenses [by category]
    List {
        /// Only show expenses in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// View a summary of all expenses
    Summary {
        /// Month of the current year (1-12)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a budget for a month
    SetBudget {
        /// Month of the budget (1-12)
        #[arg(short, long)]
        month: String,
        /// Amount of the budget
        #[arg(short, long)]
        amount: String,
    },

    /// Export expenses to a CSV file
    Export {
        /// Name of CSV file
        #[arg(short, long)]
        file: String,
    },

    /// Show the store location and current preferences, optionally changing them
    Config {
        /// Currency symbol prefixed to amounts
        #[arg(long)]
        currency_symbol: Option<String>,
        /// Date format for listings (strftime format, e.g. %Y-%m-%d)
        #[arg(long)]
        date_format: Option<String>,
    },
}

impl Commands {
    /// Prefix for error messages from this command
    pub fn error_context(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "Error adding expense",
            Commands::Update { .. } => "Error updating expense",
            Commands::Delete { .. } => "Error deleting expense",
            Commands::List { .. } => "Error listing expenses",
            Commands::Summary { .. } => "Error calculating summary",
            Commands::SetBudget { .. } => "Error setting budget",
            Commands::Export { .. } => "Error exporting expenses",
            Commands::Config {
                currency_symbol: None,
                date_format: None,
            } => "Error reading configuration",
            Commands::Config { .. } => "Error updating configuration",
        }
    }
}

/// Parse an amount typed by the user; must be at least one cent
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse_positive(input).map_err(|_| ExpenseError::invalid_amount())
}

/// Run one command against an open store
pub fn handle_command<W: Write>(
    storage: &Storage,
    prefs: &Preferences,
    confirm: &mut dyn Confirm,
    cmd: Commands,
    out: &mut W,
) -> ExpenseResult<()> {
    match cmd {
        Commands::Add {
            description,
            amount,
            category,
        } => expense::handle_add(storage, prefs, out, description, &amount, category),
        Commands::Update {
            id,
            description,
            amount,
            category,
        } => expense::handle_update(storage, out, &id, description, amount.as_deref(), category),
        Commands::Delete { id } => expense::handle_delete(storage, confirm, out, &id),
        Commands::List { category } => expense::handle_list(storage, prefs, out, category.as_deref()),
        Commands::Summary { month } => report::handle_summary(storage, prefs, out, month.as_deref()),
        Commands::SetBudget { month, amount } => {
            budget::handle_set_budget(storage, prefs, out, &month, &amount)
        }
        Commands::Export { file } => export::handle_export(storage, out, &file),
        Commands::Config {
            currency_symbol,
            date_format,
        } => config::handle_config(storage, prefs, out, currency_symbol, date_format),
    }
}
