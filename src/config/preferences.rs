//! User display preferences
//!
//! Stored in `config.json` next to the data. Every field has a default, so a
//! missing file or a partially written one both load cleanly.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::StorePaths;
use crate::error::ExpenseError;
use crate::storage::write_json_atomic;

/// Date format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Whether `format` is a strftime pattern chrono can render
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Display preferences for command output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Preferences {
    /// Load preferences from disk, falling back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &StorePaths) -> Result<Self, ExpenseError> {
        let config_path = paths.config_file();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read config file: {}", e)))?;

        let prefs: Self = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse config file: {}", e)))?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(ExpenseError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Validate and save preferences to disk
    pub fn save(&self, paths: &StorePaths) -> Result<(), ExpenseError> {
        self.validate()?;
        paths.ensure_directories()?;
        write_json_atomic(paths.config_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        let prefs = Preferences::load_or_default(&paths).unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.currency_symbol, "$");
        assert_eq!(prefs.date_format, "%m/%d/%Y");
        assert!(!paths.config_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());

        let prefs = Preferences {
            currency_symbol: "€".into(),
            ..Preferences::default()
        };
        prefs.save(&paths).unwrap();

        let loaded = Preferences::load_or_default(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), r#"{"date_format": "%Y-%m-%d"}"#).unwrap();

        let loaded = Preferences::load_or_default(&paths).unwrap();
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_date_format_check() {
        assert!(is_valid_date_format(DEFAULT_DATE_FORMAT));
        assert!(is_valid_date_format("%Y-%m-%d %H:%M"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
    }

    #[test]
    fn test_invalid_date_format_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Preferences::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_save_rejects_invalid_date_format() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let prefs = Preferences {
            date_format: "%Q".into(),
            ..Preferences::default()
        };

        assert!(prefs.save(&paths).is_err());
        assert!(!paths.config_file().exists());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "not json").unwrap();

        let err = Preferences::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }
}
