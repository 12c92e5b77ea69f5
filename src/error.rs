//! Error types for the autoformat engine
//!
//! This module defines all custom error types used throughout the crate.
//! Error types are organized by category for clear error handling and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// Document editing errors
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Session persistence errors
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Document editing errors
///
/// These are contract violations between the caller and the document
/// engine. An edit that fails with one of these leaves the document untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A character range fell outside the current bounds of a block
    #[error("Invalid range {start}..{end} in block {block} of length {len}")]
    InvalidRange {
        block: String,
        start: usize,
        end: usize,
        len: usize,
    },

    /// A block key did not resolve to a block in the current content
    #[error("Unknown block: {key}")]
    UnknownBlock { key: String },
}

/// Session persistence errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Error reading the session store
    #[error("Could not read session store: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the session store
    #[error("Could not write session store: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session store contents are not valid
    #[error("Invalid session store format: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Could not determine session directory
    #[error("Could not determine session directory")]
    DirectoryError,
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Could not load configuration: {0}")]
    LoadError(String),

    /// Error saving configuration
    #[error("Could not save configuration: {0}")]
    SaveError(String),

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for document editing operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Result type alias for session persistence operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl SessionError {
    /// Create a user-friendly error message suitable for display in dialogs
    pub fn user_message(&self) -> String {
        match self {
            SessionError::ReadError { .. } | SessionError::ParseError(_) => {
                "The saved text could not be restored. Starting with an empty document.".to_string()
            }
            SessionError::WriteError { .. } => {
                "Could not save the text. Check disk space and permissions.".to_string()
            }
            SessionError::DirectoryError => self.to_string(),
        }
    }
}

impl ConfigError {
    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::InvalidValue { key, .. } => {
                format!("The setting \"{}\" is not valid. Defaults will be used.", key)
            }
            _ => self.to_string(),
        }
    }
}
