//! Budget settings repository
//!
//! settings.json holds at most one record, `global_settings`. The file is not
//! created until the first budget is set.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::BudgetSettings;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the singleton budget settings record
pub struct SettingsRepository {
    path: PathBuf,
    data: RwLock<Option<BudgetSettings>>,
}

impl SettingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    /// Load the record from disk, if it exists
    pub fn load(&self) -> Result<(), ExpenseError> {
        let loaded: Option<BudgetSettings> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = loaded;
        Ok(())
    }

    /// Persist the record; does nothing while it has never been created
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        match data.as_ref() {
            Some(settings) => write_json_atomic(&self.path, settings),
            None => Ok(()),
        }
    }

    /// The settings record, if it has been created
    pub fn get(&self) -> Result<Option<BudgetSettings>, ExpenseError> {
        let data = self
            .data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Replace the settings record
    pub fn put(&self, settings: BudgetSettings) -> Result<(), ExpenseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = Some(settings);
        Ok(())
    }
}
