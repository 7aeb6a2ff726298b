//! # Reporter Module
//!
//! The end-of-scan summary handed to whatever presents it.
//!
//! A summary always exists: a scan that never started (the store could not
//! be opened) reports every count as zero.

use serde::{Deserialize, Serialize};

/// Subject shown when an item's subject cannot be read
pub const SUBJECT_UNAVAILABLE: &str = "N/A";

/// Unique and duplicate counts for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub unique: usize,
    pub duplicate: usize,
}

impl CategoryCounts {
    /// Items of this category that were processed successfully
    pub fn processed(&self) -> usize {
        self.unique + self.duplicate
    }
}

/// Items that did not take part in dedup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Items of a class that is not deduplicated
    pub unclassified: usize,
    /// Items whose processing failed
    pub failed: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.unclassified + self.failed
    }
}

/// Why something was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path of the folder where it happened
    pub folder: String,
    /// Subject of the failing item, `None` for folder-level problems
    pub subject: Option<String>,
    pub reason: String,
}

impl Diagnostic {
    pub fn item(folder: &str, subject: &str, reason: impl Into<String>) -> Self {
        Self {
            folder: folder.to_string(),
            subject: Some(subject.to_string()),
            reason: reason.into(),
        }
    }

    pub fn folder(folder: &str, reason: impl Into<String>) -> Self {
        Self {
            folder: folder.to_string(),
            subject: None,
            reason: reason.into(),
        }
    }
}

/// Final counts of a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Name of the scanned store, `None` if it was never opened
    pub store: Option<String>,
    pub messages: CategoryCounts,
    pub meetings: CategoryCounts,
    pub skipped: SkipCounts,
    pub diagnostics: Vec<Diagnostic>,
    pub items_visited: usize,
    pub duration_ms: u64,
}

impl ScanSummary {
    /// The summary of a scan that never started
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reported counts, in report order
    pub fn figures(&self) -> [(&'static str, usize); 5] {
        [
            ("unique messages", self.messages.unique),
            ("duplicate messages", self.messages.duplicate),
            ("unique meetings", self.meetings.unique),
            ("duplicate meetings", self.meetings.duplicate),
            ("skipped items", self.skipped.total()),
        ]
    }
}
