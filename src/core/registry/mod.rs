//! # Registry Module
//!
//! Per-scan dedup state: one fingerprint set per category plus the skip
//! tally. A `ScanContext` is created when a scan starts and dropped when it
//! ends; nothing carries over between scans.
//!
//! The context is mutated through `&mut` from a single thread. Parallel
//! traversal would need per-category synchronization.

use crate::core::classifier::Category;
use crate::core::fingerprint::Fingerprint;
use crate::core::reporter::{CategoryCounts, Diagnostic, ScanSummary, SkipCounts};
use std::collections::HashSet;

/// Whether a fingerprint was new to its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Unique,
    Duplicate,
}

/// Seen fingerprints for one category.
///
/// The unique count is the size of the set, so the two can never drift.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: HashSet<Fingerprint>,
    duplicates: usize,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `fingerprint`, or count a duplicate if already present
    pub fn record_and_check(&mut self, fingerprint: Fingerprint) -> Verdict {
        if self.seen.insert(fingerprint) {
            Verdict::Unique
        } else {
            self.duplicates += 1;
            Verdict::Duplicate
        }
    }

    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            unique: self.unique_count(),
            duplicate: self.duplicate_count(),
        }
    }
}

/// Everything a single scan accumulates
#[derive(Debug, Default)]
pub struct ScanContext {
    messages: DedupRegistry,
    meetings: DedupRegistry,
    skipped: SkipCounts,
    diagnostics: Vec<Diagnostic>,
    items_visited: usize,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self, category: Category) -> &DedupRegistry {
        match category {
            Category::Message => &self.messages,
            Category::Meeting => &self.meetings,
        }
    }

    /// Record a fingerprint in its category's registry
    pub fn record_and_check(&mut self, category: Category, fingerprint: Fingerprint) -> Verdict {
        let registry = match category {
            Category::Message => &mut self.messages,
            Category::Meeting => &mut self.meetings,
        };
        registry.record_and_check(fingerprint)
    }

    pub fn record_unclassified(&mut self) {
        self.skipped.unclassified += 1;
    }

    pub fn record_failure(&mut self, diagnostic: Diagnostic) {
        self.skipped.failed += 1;
        self.diagnostics.push(diagnostic);
    }

    /// Note a problem that did not correspond to a single item
    pub fn record_folder_failure(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Count a visited item and return the running total
    pub fn visit(&mut self) -> usize {
        self.items_visited += 1;
        self.items_visited
    }

    pub fn items_visited(&self) -> usize {
        self.items_visited
    }

    pub fn skipped(&self) -> SkipCounts {
        self.skipped
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Freeze the counts into a summary
    pub fn into_summary(self, store: Option<String>, duration_ms: u64) -> ScanSummary {
        ScanSummary {
            store,
            messages: self.messages.counts(),
            meetings: self.meetings.counts(),
            skipped: self.skipped,
            diagnostics: self.diagnostics,
            items_visited: self.items_visited,
            duration_ms,
        }
    }
}
