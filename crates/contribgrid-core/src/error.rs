//! Core error types for contribgrid-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are the only errors the grid and script generator can produce;
//! the remaining variants come from storage.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for contribgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
///
/// `InvalidEmail` and `InvalidRepositoryUrl` abort script generation before
/// a single line is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author email missing or lacking `@`
    #[error("Invalid author email {0:?}: enter the email associated with your GitHub account")]
    InvalidEmail(String),

    /// Repository URL not of the form `https://...git`
    #[error("Invalid repository URL {0:?}: expected e.g. https://github.com/user/repo.git")]
    InvalidRepositoryUrl(String),

    /// Year outside the editable range or not a number
    #[error("Invalid year {0:?}: expected a year between 1901 and 2999")]
    InvalidYear(String),

    /// Commit time not in `HH:MM` form
    #[error("Invalid commit time {0:?}: expected HH:MM")]
    InvalidCommitTime(String),

    /// Date not parseable or not inside the grid's year
    #[error("Invalid date {date:?}: {message}")]
    InvalidDate { date: String, message: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
