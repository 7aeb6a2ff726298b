//! Directory-backed store using walkdir.
//!
//! Layout: every directory is a folder and every `*.json` file inside it is
//! one item record. Entries are enumerated in file-name order; hidden
//! entries are ignored.

use super::{ItemRecord, MailFolder, MailItem, MailStore, Occurrence, Timestamp};
use crate::core::fingerprint::decode_store_text;
use crate::error::{ItemError, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// A store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    name: String,
}

impl DirectoryStore {
    /// Open a store directory
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        if !root.is_dir() {
            return Err(StoreError::NotFound {
                path: root.to_path_buf(),
            });
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Ok(Self {
            root: root.to_path_buf(),
            name,
        })
    }
}

impl MailStore for DirectoryStore {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn root_folder(&self) -> Result<Box<dyn MailFolder + '_>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::RootFolder {
                store: self.name.clone(),
                reason: format!("{} is no longer a directory", self.root.display()),
            });
        }

        Ok(Box::new(DirectoryFolder {
            path: self.root.clone(),
        }))
    }

    fn close(&mut self) {
        debug!(store = %self.name, "releasing directory store");
    }
}

struct DirectoryFolder {
    path: PathBuf,
}

impl DirectoryFolder {
    /// Direct children of this folder, sorted by file name
    fn children(&self) -> Result<Vec<DirEntry>, StoreError> {
        WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::FolderEnumeration {
                folder: self.path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_item_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
}

impl MailFolder for DirectoryFolder {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn items(&self) -> Result<Vec<Box<dyn MailItem + '_>>, StoreError> {
        Ok(self
            .children()?
            .into_iter()
            .filter(is_item_file)
            .map(|entry| Box::new(ItemFile::load(entry.path())) as Box<dyn MailItem + '_>)
            .collect())
    }

    fn folders(&self) -> Result<Vec<Box<dyn MailFolder + '_>>, StoreError> {
        Ok(self
            .children()?
            .into_iter()
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| {
                Box::new(DirectoryFolder {
                    path: entry.into_path(),
                }) as Box<dyn MailFolder + '_>
            })
            .collect())
    }
}

/// One item file. A file that cannot be read or parsed still enumerates as
/// an item, but every field read on it fails.
enum ItemFile {
    Parsed(ItemRecord),
    Unreadable { path: PathBuf, reason: String },
}

impl ItemFile {
    fn load(path: &Path) -> Self {
        let parsed = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                serde_json::from_str::<ItemRecord>(&decode_store_text(&bytes))
                    .map_err(|e| e.to_string())
            });

        match parsed {
            Ok(record) => ItemFile::Parsed(record),
            Err(reason) => ItemFile::Unreadable {
                path: path.to_path_buf(),
                reason,
            },
        }
    }

    fn record(&self) -> Result<&ItemRecord, ItemError> {
        match self {
            ItemFile::Parsed(record) => Ok(record),
            ItemFile::Unreadable { path, reason } => Err(ItemError::Unreadable {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

impl MailItem for ItemFile {
    fn class(&self) -> Result<u32, ItemError> {
        self.record()?.class()
    }

    fn subject(&self) -> Result<String, ItemError> {
        self.record()?.subject()
    }

    fn sent_on(&self) -> Result<Timestamp, ItemError> {
        self.record()?.sent_on()
    }

    fn sender_name(&self) -> Result<String, ItemError> {
        self.record()?.sender_name()
    }

    fn to(&self) -> Result<String, ItemError> {
        self.record()?.to()
    }

    fn body(&self) -> Result<String, ItemError> {
        self.record()?.body()
    }

    fn resolve_occurrence(&self) -> Result<Occurrence, ItemError> {
        self.record()?.resolve_occurrence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_item(dir: &Path, name: &str, json: &str) {
        fs::write(dir.join(name), json).unwrap();
    }

    #[test]
    fn items_are_json_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        write_item(temp_dir.path(), "b.json", r#"{"class": 43, "subject": "second"}"#);
        write_item(temp_dir.path(), "a.json", r#"{"class": 43, "subject": "first"}"#);
        write_item(temp_dir.path(), "notes.txt", "ignored");
        write_item(temp_dir.path(), ".hidden.json", r#"{"class": 43}"#);

        let store = DirectoryStore::open(temp_dir.path()).unwrap();
        let root = store.root_folder().unwrap();
        let subjects: Vec<_> = root
            .items()
            .unwrap()
            .iter()
            .map(|i| i.subject().unwrap())
            .collect();

        assert_eq!(subjects, vec!["first", "second"]);
    }

    #[test]
    fn subdirectories_are_folders() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("Inbox")).unwrap();
        fs::create_dir(temp_dir.path().join("Archive")).unwrap();

        let store = DirectoryStore::open(temp_dir.path()).unwrap();
        let root = store.root_folder().unwrap();
        let names: Vec<_> = root.folders().unwrap().iter().map(|f| f.name()).collect();

        assert_eq!(names, vec!["Archive", "Inbox"]);
    }

    #[test]
    fn broken_item_file_fails_per_field() {
        let temp_dir = TempDir::new().unwrap();
        write_item(temp_dir.path(), "broken.json", "{ class: ");

        let store = DirectoryStore::open(temp_dir.path()).unwrap();
        let root = store.root_folder().unwrap();
        let items = root.items().unwrap();

        assert_eq!(items.len(), 1);
        assert!(matches!(items[0].class(), Err(ItemError::Unreadable { .. })));
        assert!(items[0].subject().is_err());
    }

    #[test]
    fn utf16_item_file_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let mut bytes = vec![0xFF, 0xFE];
        for unit in r#"{"class": 43, "subject": "Grüße"}"#.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(temp_dir.path().join("item.json"), bytes).unwrap();

        let store = DirectoryStore::open(temp_dir.path()).unwrap();
        let root = store.root_folder().unwrap();
        let items = root.items().unwrap();

        assert_eq!(items[0].subject().unwrap(), "Grüße");
    }

    #[test]
    fn open_rejects_missing_directory() {
        let result = DirectoryStore::open(Path::new("/nonexistent/store-12345"));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}
