//! # Store Module
//!
//! The boundary to whatever holds the mail. The core only sees the traits
//! defined here; concrete adapters live in the submodules.
//!
//! ## Bundled Adapters
//! - `SnapshotStore` - a folder tree held in memory, optionally loaded
//!   from a `.json` snapshot file
//! - `DirectoryStore` - a directory tree where each `*.json` file is one item
//!
//! ## Example
//! ```rust,ignore
//! use mail_dedup::core::store::{FileSystemOpener, StoreOpener};
//!
//! let store = FileSystemOpener.open(Path::new("mailbox.json"))?;
//! let root = store.root_folder()?;
//! ```

mod directory;
mod record;
mod session;
mod snapshot;

pub use directory::DirectoryStore;
pub use record::{FolderRecord, ItemRecord, OccurrenceRecord};
pub use session::StoreSession;
pub use snapshot::SnapshotStore;

use crate::error::{ItemError, StoreError};
use chrono::{DateTime, FixedOffset};
use std::path::Path;

/// Point in time as reported by the store
pub type Timestamp = DateTime<FixedOffset>;

/// Render a timestamp the way it appears inside a canonical key.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

/// Parse an RFC 3339 timestamp read from a store record.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<Timestamp, ItemError> {
    DateTime::parse_from_rfc3339(raw.trim()).map_err(|e| ItemError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

/// The calendar event a meeting request or cancellation refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub subject: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub location: String,
    pub required_attendees: String,
    pub body: String,
}

/// A single entry in a folder.
///
/// Every accessor may fail independently; a failure affects only the item
/// it came from.
pub trait MailItem {
    /// Discriminant code identifying the item variant
    fn class(&self) -> Result<u32, ItemError>;

    fn subject(&self) -> Result<String, ItemError>;

    fn sent_on(&self) -> Result<Timestamp, ItemError>;

    fn sender_name(&self) -> Result<String, ItemError>;

    /// Recipient line, possibly listing several recipients
    fn to(&self) -> Result<String, ItemError>;

    fn body(&self) -> Result<String, ItemError>;

    /// Look up the occurrence behind a meeting notice. Blocking.
    fn resolve_occurrence(&self) -> Result<Occurrence, ItemError>;
}

/// A node in the store's folder tree.
///
/// Folder trees are acyclic; this is not re-validated.
pub trait MailFolder {
    fn name(&self) -> String;

    /// Items in enumeration order
    fn items(&self) -> Result<Vec<Box<dyn MailItem + '_>>, StoreError>;

    /// Sub-folders in enumeration order
    fn folders(&self) -> Result<Vec<Box<dyn MailFolder + '_>>, StoreError>;
}

/// An opened mail store.
pub trait MailStore {
    /// Human-readable name used in logs and reports
    fn display_name(&self) -> String;

    fn root_folder(&self) -> Result<Box<dyn MailFolder + '_>, StoreError>;

    /// Release the store. Called exactly once by `StoreSession`.
    fn close(&mut self);
}

/// Locates and opens a store from a path or identifier.
///
/// Implement this trait to scan custom stores (e.g., for testing).
pub trait StoreOpener {
    fn open(&self, location: &Path) -> Result<Box<dyn MailStore>, StoreError>;
}

/// Opens `.json` snapshots and store directories from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemOpener;

impl StoreOpener for FileSystemOpener {
    fn open(&self, location: &Path) -> Result<Box<dyn MailStore>, StoreError> {
        if !location.exists() {
            return Err(StoreError::NotFound {
                path: location.to_path_buf(),
            });
        }

        if location.is_dir() {
            return Ok(Box::new(DirectoryStore::open(location)?));
        }

        let is_json = location
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Ok(Box::new(SnapshotStore::from_json_file(location)?))
        } else {
            Err(StoreError::UnsupportedFormat {
                path: location.to_path_buf(),
            })
        }
    }
}

impl<T: MailItem + ?Sized> MailItem for &T {
    fn class(&self) -> Result<u32, ItemError> {
        (**self).class()
    }

    fn subject(&self) -> Result<String, ItemError> {
        (**self).subject()
    }

    fn sent_on(&self) -> Result<Timestamp, ItemError> {
        (**self).sent_on()
    }

    fn sender_name(&self) -> Result<String, ItemError> {
        (**self).sender_name()
    }

    fn to(&self) -> Result<String, ItemError> {
        (**self).to()
    }

    fn body(&self) -> Result<String, ItemError> {
        (**self).body()
    }

    fn resolve_occurrence(&self) -> Result<Occurrence, ItemError> {
        (**self).resolve_occurrence()
    }
}

impl<T: MailFolder + ?Sized> MailFolder for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn items(&self) -> Result<Vec<Box<dyn MailItem + '_>>, StoreError> {
        (**self).items()
    }

    fn folders(&self) -> Result<Vec<Box<dyn MailFolder + '_>>, StoreError> {
        (**self).folders()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn timestamps_render_with_offset() {
        let ts = parse_timestamp("sent_on", "2024-03-01T09:30:00+09:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-01 09:30:00+09:00");
    }

    #[test]
    fn utc_designator_matches_zero_offset() {
        let z = parse_timestamp("sent_on", "2024-03-01T09:30:00Z").unwrap();
        let zero = parse_timestamp("sent_on", "2024-03-01T09:30:00+00:00").unwrap();
        assert_eq!(format_timestamp(&z), format_timestamp(&zero));
    }

    #[test]
    fn bad_timestamp_names_the_field() {
        let error = parse_timestamp("start", "next tuesday").unwrap_err();
        assert!(matches!(error, ItemError::InvalidField { field: "start", .. }));
    }

    #[test]
    fn opener_reports_missing_store() {
        let result = FileSystemOpener.open(Path::new("/nonexistent/mailbox-12345.json"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn opener_rejects_unknown_file_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mailbox.pst");
        std::fs::write(&path, b"not a snapshot").unwrap();

        let result = FileSystemOpener.open(&path);
        assert!(matches!(result, Err(StoreError::UnsupportedFormat { .. })));
    }

    #[test]
    fn opener_accepts_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemOpener.open(dir.path()).unwrap();
        assert!(store.root_folder().is_ok());
    }
}
