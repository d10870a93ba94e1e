//! Core error types for studygate-core.
//!
//! Every failure inside the gating core has a typed variant here. Most of
//! them are absorbed where they happen (logged, then degraded to a safe
//! default); only configuration errors reach the host as a rejection.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studygate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Blocklist storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session persistence errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Navigation target could not be evaluated
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors, both for session durations and the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Session duration outside the accepted range
    #[error("Invalid {field}: {value} (expected {min}..={max})")]
    InvalidDuration {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the key's type
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Blocklist file errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Blocklist file does not exist yet
    #[error("Blocklist file not found at {0}")]
    Missing(PathBuf),

    /// Blocklist file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blocklist file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blocklist file is not a JSON array
    #[error("Malformed blocklist at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Session recording errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// A navigation target that cannot be checked against the blocklist.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationParseError {
    #[error("empty navigation target")]
    Empty,

    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL '{0}' has no host")]
    MissingHost(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    PersistenceError::Locked
                } else {
                    PersistenceError::QueryFailed(err.to_string())
                }
            }
            _ => PersistenceError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
