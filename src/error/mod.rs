//! # Error Module
//!
//! User-friendly error types for the mail store duplicate finder.
//!
//! ## Design Principles
//! - **Never panic** on store data - return errors instead
//! - **Include context** - paths, field names, what went wrong
//! - **Contain item failures** - `ItemError` never escapes a single item
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum MailDedupError {
    #[error("Mail store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while opening a mail store or walking its folders
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Mail store not found: {path}. Check that the path is correct.")]
    NotFound { path: PathBuf },

    #[error("Unsupported mail store {path}: expected a .json snapshot or a directory")]
    UnsupportedFormat { path: PathBuf },

    #[error("Mail store {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to read mail store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Root folder of {store} is unavailable: {reason}")]
    RootFolder { store: String, reason: String },

    #[error("Failed to enumerate folder {folder}: {reason}")]
    FolderEnumeration { folder: String, reason: String },
}

/// Errors that occur while processing a single item
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("field '{field}' is unavailable")]
    FieldUnavailable { field: &'static str },

    #[error("field '{field}' has an invalid value: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("associated occurrence could not be resolved: {reason}")]
    OccurrenceUnresolved { reason: String },

    #[error("item {path} could not be loaded: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, MailDedupError>;
