//! Event type definitions for progress reporting.

use crate::core::classifier::Category;
use crate::core::reporter::ScanSummary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Store lifecycle events
    Store(StoreEvent),
    /// Traversal events
    Scan(ScanEvent),
}

/// Events about the mail store handle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreEvent {
    /// The store was opened
    Opened { name: String },
    /// The store could not be opened; no scan will run
    OpenFailed { location: PathBuf, message: String },
    /// The store handle was released
    Closed { name: String },
}

/// Events during traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Traversal has started at the root folder
    Started { store: String, root: String },
    /// A folder is about to be scanned
    FolderEntered { path: String, item_count: usize },
    /// A folder could not be enumerated and was skipped
    FolderFailed { path: String, message: String },
    /// One item was visited
    ItemProcessed(ItemProgress),
    /// Traversal finished
    Completed { summary: ScanSummary },
}

/// Progress information for one visited item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemProgress {
    /// Path of the folder holding the item
    pub folder: String,
    /// Enumeration index of the item within its folder
    pub index: usize,
    /// What happened to the item
    pub disposition: ItemDisposition,
    /// Number of items visited so far in this scan
    pub items_visited: usize,
}

/// Outcome of a visited item, as seen by a UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemDisposition {
    /// First item with this fingerprint in its category
    Unique(Category),
    /// Fingerprint already seen in its category
    Duplicate(Category),
    /// Not a message or meeting notice
    Unclassified { class: u32 },
    /// Processing failed; the item was skipped
    Failed { subject: String, reason: String },
}

impl ItemDisposition {
    /// Whether the item counts toward the skipped total
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            ItemDisposition::Unclassified { .. } | ItemDisposition::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Scan(ScanEvent::ItemProcessed(ItemProgress {
            folder: "Inbox".to_string(),
            index: 3,
            disposition: ItemDisposition::Duplicate(Category::Message),
            items_visited: 12,
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Scan(ScanEvent::ItemProcessed(p)) => {
                assert_eq!(p.index, 3);
                assert_eq!(p.disposition, ItemDisposition::Duplicate(Category::Message));
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn skips_are_unclassified_or_failed() {
        assert!(ItemDisposition::Unclassified { class: 26 }.is_skip());
        assert!(ItemDisposition::Failed {
            subject: "N/A".to_string(),
            reason: "broken".to_string(),
        }
        .is_skip());
        assert!(!ItemDisposition::Unique(Category::Meeting).is_skip());
    }
}
