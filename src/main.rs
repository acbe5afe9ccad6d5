use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use expense_tracker::cli::{handle_command, Commands, PromptConfirm};
use expense_tracker::config::{Preferences, StorePaths, STORE_ENV_VAR};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "CLI to manage your finances",
    long_about = "Record expenses, set monthly budgets and get warned when a month \
                  goes over budget. Summaries and CSV export included."
)]
struct Cli {
    /// Store location: a directory path or file:// URL
    #[arg(long, global = true, env = STORE_ENV_VAR)]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = match cli.store.as_deref() {
        Some(conn) if !conn.trim().is_empty() => StorePaths::from_connection_string(conn)?,
        _ => StorePaths::new()?,
    };
    let prefs = Preferences::load_or_default(&paths)?;

    let storage = Storage::open(paths).context("Failed to open the expense store")?;

    let context = cli.command.error_context();
    let mut confirm = PromptConfirm::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = handle_command(&storage, &prefs, &mut confirm, cli.command, &mut out) {
        log::debug!("{} failed: {:?}", context, err);
        eprintln!("{}: {}", context, err);
    }

    Ok(())
}
