//! Storage layer for the expense tracker
//!
//! Provides JSON document storage with atomic writes. `Storage` is the store
//! handle: it is opened once per invocation, borrowed by every command, and
//! released when it goes out of scope.

pub mod expenses;
pub mod file_io;
pub mod settings;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use settings::SettingsRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::StorePaths;
use crate::error::ExpenseError;

/// Store handle giving access to every repository
pub struct Storage {
    paths: StorePaths,
    pub expenses: ExpenseRepository,
    pub settings: SettingsRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a Storage instance without loading any data
    pub fn new(paths: StorePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settings: SettingsRepository::new(paths.settings_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open the store at `paths` and load every collection
    pub fn open(paths: StorePaths) -> Result<Self, ExpenseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        log::debug!("opened store at {}", storage.paths.base_dir().display());
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.expenses.load()?;
        self.settings.load()?;
        Ok(())
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        log::debug!("released store at {}", self.paths.base_dir().display());
    }
}
