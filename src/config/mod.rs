//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Store location resolution
//! - User display preferences

pub mod paths;
pub mod preferences;

pub use paths::{StorePaths, STORE_ENV_VAR};
pub use preferences::{is_valid_date_format, Preferences, DEFAULT_DATE_FORMAT};
