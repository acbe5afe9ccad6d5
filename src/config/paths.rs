//! Store location management
//!
//! Resolves where the expense store lives on disk.
//!
//! ## Path Resolution Order
//!
//! 1. `--store` flag or `EXPENSE_TRACKER_STORE` environment variable (if set),
//!    either a plain directory path or a `file://` URL
//! 2. The platform data directory (`~/.local/share/expense-tracker` on Linux,
//!    `~/Library/Application Support/expense-tracker` on macOS,
//!    `%APPDATA%\expense-tracker\data` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable holding the store connection string
pub const STORE_ENV_VAR: &str = "EXPENSE_TRACKER_STORE";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Base directory for all store data
    base_dir: PathBuf,
}

impl StorePaths {
    /// Resolve the store location from the environment or platform default
    ///
    /// # Errors
    ///
    /// Returns an error if neither the environment variable nor a platform
    /// data directory is available.
    pub fn new() -> Result<Self, ExpenseError> {
        match std::env::var(STORE_ENV_VAR) {
            Ok(conn) if !conn.trim().is_empty() => Self::from_connection_string(&conn),
            _ => Ok(Self {
                base_dir: resolve_default_path()?,
            }),
        }
    }

    /// Build paths from a store connection string
    ///
    /// Accepts `file:///abs/dir`, `file://relative/dir` or a bare path.
    pub fn from_connection_string(conn: &str) -> Result<Self, ExpenseError> {
        let conn = conn.trim();
        let path = match conn.split_once("://") {
            Some(("file", rest)) => rest,
            Some((scheme, _)) => {
                return Err(ExpenseError::Config(format!(
                    "Unsupported store scheme '{}': expected a directory path or file:// URL",
                    scheme
                )))
            }
            None => conn,
        };

        if path.is_empty() {
            return Err(ExpenseError::Config("Store location is empty".into()));
        }

        Ok(Self {
            base_dir: PathBuf::from(path),
        })
    }

    /// Create StorePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the user preferences file
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.base_dir.join("expenses.json")
    }

    /// Get the path to settings.json (the budget settings record)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Ensure the store directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ExpenseError::Io(format!(
                "Failed to create store directory {}: {}",
                self.base_dir.display(),
                e
            ))
        })
    }
}

/// Resolve the default store directory based on platform
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            ExpenseError::Config(format!(
                "Could not determine a data directory; set {}",
                STORE_ENV_VAR
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.expenses_file(), temp_dir.path().join("expenses.json"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("settings.json"));
        assert_eq!(paths.config_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_connection_string_forms() {
        let plain = StorePaths::from_connection_string("/var/lib/expenses").unwrap();
        assert_eq!(plain.base_dir(), Path::new("/var/lib/expenses"));

        let url = StorePaths::from_connection_string("file:///var/lib/expenses").unwrap();
        assert_eq!(url.base_dir(), Path::new("/var/lib/expenses"));

        let relative = StorePaths::from_connection_string(" file://data ").unwrap();
        assert_eq!(relative.base_dir(), Path::new("data"));
    }

    #[test]
    fn test_connection_string_rejects_other_schemes() {
        let err = StorePaths::from_connection_string("mongodb://localhost/expenses").unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
        assert!(StorePaths::from_connection_string("file://").is_err());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().join("nested").join("store"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
