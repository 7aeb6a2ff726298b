//! In-memory store, optionally loaded from a JSON snapshot.

use super::{FolderRecord, MailFolder, MailStore};
use crate::core::fingerprint::decode_store_text;
use crate::error::StoreError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A whole folder tree held in memory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    name: String,
    root: FolderRecord,
}

impl SnapshotStore {
    pub fn new(name: impl Into<String>, root: FolderRecord) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Load a snapshot whose top-level object is the root folder record.
    ///
    /// UTF-16 files need a byte order mark. Invalid sequences are dropped
    /// before parsing.
    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = decode_store_text(&bytes);
        let root: FolderRecord =
            serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.name.clone());

        debug!(store = %name, path = %path.display(), "loaded snapshot");
        Ok(Self::new(name, root))
    }
}

impl MailStore for SnapshotStore {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn root_folder(&self) -> Result<Box<dyn MailFolder + '_>, StoreError> {
        Ok(Box::new(&self.root))
    }

    fn close(&mut self) {
        debug!(store = %self.name, "releasing snapshot");
        self.root = FolderRecord::default();
    }
}
