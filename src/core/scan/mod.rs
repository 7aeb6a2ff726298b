//! # Scan Module
//!
//! Orchestrates a full scan: open the store, walk its folders, release the
//! store, and hand back a summary.
//!
//! ## Guarantees
//! - A summary is always produced, even when the store cannot be opened
//! - The store is released exactly once if it was opened
//! - Only a failure to open the store (or its root folder) stops a scan
//!
//! ## Example
//! ```rust,ignore
//! use mail_dedup::core::scan::Scanner;
//!
//! let scanner = Scanner::builder().store_path("mailbox.json").build()?;
//! let outcome = scanner.run();
//! println!("{} unique messages", outcome.summary.messages.unique);
//! ```

mod isolation;
mod traversal;

pub use isolation::{process_item, ItemOutcome};
pub use traversal::walk;

use crate::core::registry::ScanContext;
use crate::core::reporter::ScanSummary;
use crate::core::store::{FileSystemOpener, MailStore, StoreOpener, StoreSession};
use crate::error::{MailDedupError, StoreError};
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Result of a scan run
#[derive(Debug)]
pub struct ScanOutcome {
    /// Final counts; all zero if the scan never started
    pub summary: ScanSummary,
    /// The failure that prevented the scan, if any
    pub fatal: Option<StoreError>,
}

impl ScanOutcome {
    pub fn is_complete(&self) -> bool {
        self.fatal.is_none()
    }
}

/// Configuration for a scan
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Path or identifier of the store to scan
    pub store_path: PathBuf,
}

/// Builder for `Scanner`
pub struct ScannerBuilder {
    config: ScanConfig,
    opener: Option<Box<dyn StoreOpener>>,
}

impl ScannerBuilder {
    pub fn new() -> Self {
        Self {
            config: ScanConfig::default(),
            opener: None,
        }
    }

    /// Set the store to scan
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Replace the filesystem opener
    pub fn opener(mut self, opener: Box<dyn StoreOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Build the scanner
    pub fn build(self) -> Result<Scanner, MailDedupError> {
        if self.config.store_path.as_os_str().is_empty() {
            return Err(MailDedupError::Config(
                "no mail store path was given".to_string(),
            ));
        }

        Ok(Scanner {
            config: self.config,
            opener: self.opener.unwrap_or_else(|| Box::new(FileSystemOpener)),
        })
    }
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans one mail store for duplicates
pub struct Scanner {
    config: ScanConfig,
    opener: Box<dyn StoreOpener>,
}

impl Scanner {
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Run the scan without events
    pub fn run(&self) -> ScanOutcome {
        self.run_with_events(&null_sender())
    }

    /// Run the scan with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> ScanOutcome {
        let started = Instant::now();

        match StoreSession::open(self.opener.as_ref(), &self.config.store_path, events) {
            Ok(session) => scan_session(&session, events, started),
            Err(e) => {
                debug!(
                    store = %self.config.store_path.display(),
                    error = %e,
                    "scan could not start"
                );
                finish(ScanSummary::empty(), Some(e), events)
            }
        }
    }

    /// Scan a store that is already open. The store is released before
    /// this returns.
    pub fn scan_store(store: Box<dyn MailStore>, events: &EventSender) -> ScanOutcome {
        let started = Instant::now();
        let session = StoreSession::attach(store, events);
        scan_session(&session, events, started)
    }
}

fn scan_session(session: &StoreSession, events: &EventSender, started: Instant) -> ScanOutcome {
    let store_name = session.name().to_string();

    let root = match session.store().root_folder() {
        Ok(root) => root,
        Err(e) => {
            debug!(store = %store_name, error = %e, "root folder unavailable");
            let summary = ScanSummary {
                store: Some(store_name),
                ..ScanSummary::empty()
            };
            return finish(summary, Some(e), events);
        }
    };

    let root_name = root.name();
    info!(store = %store_name, root = %root_name, "starting scan");
    events.send(Event::Scan(ScanEvent::Started {
        store: store_name.clone(),
        root: root_name.clone(),
    }));

    let mut context = ScanContext::new();
    walk(root.as_ref(), &root_name, &mut context, events);

    let summary = context.into_summary(Some(store_name), started.elapsed().as_millis() as u64);
    info!(
        unique_messages = summary.messages.unique,
        duplicate_messages = summary.messages.duplicate,
        unique_meetings = summary.meetings.unique,
        duplicate_meetings = summary.meetings.duplicate,
        skipped = summary.skipped.total(),
        "scan finished"
    );

    finish(summary, None, events)
}

fn finish(summary: ScanSummary, fatal: Option<StoreError>, events: &EventSender) -> ScanOutcome {
    events.send(Event::Scan(ScanEvent::Completed {
        summary: summary.clone(),
    }));
    ScanOutcome { summary, fatal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{FolderRecord, ItemRecord, MailFolder, SnapshotStore};
    use crate::events::{EventChannel, StoreEvent};
    use std::cell::Cell;
    use std::path::Path;
    use std::rc::Rc;

    struct NoRootStore {
        closes: Rc<Cell<usize>>,
    }

    impl MailStore for NoRootStore {
        fn display_name(&self) -> String {
            "no-root".to_string()
        }

        fn root_folder(&self) -> Result<Box<dyn MailFolder + '_>, StoreError> {
            Err(StoreError::RootFolder {
                store: "no-root".to_string(),
                reason: "detached".to_string(),
            })
        }

        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    struct SnapshotOpener(FolderRecord);

    impl StoreOpener for SnapshotOpener {
        fn open(&self, _location: &Path) -> Result<Box<dyn MailStore>, StoreError> {
            Ok(Box::new(SnapshotStore::new("fixture", self.0.clone())))
        }
    }

    #[test]
    fn builder_requires_a_store_path() {
        assert!(matches!(
            Scanner::builder().build(),
            Err(MailDedupError::Config(_))
        ));
    }

    #[test]
    fn custom_opener_is_used() {
        let root = FolderRecord::new("Top").with_items(vec![ItemRecord::message(
            "2024-01-01T00:00:00Z",
            "Ana",
            "Bo",
            "Hi",
            "Body",
        )]);
        let scanner = Scanner::builder()
            .store_path("fixture")
            .opener(Box::new(SnapshotOpener(root)))
            .build()
            .unwrap();

        let outcome = scanner.run();

        assert!(outcome.is_complete());
        assert_eq!(outcome.summary.store.as_deref(), Some("fixture"));
        assert_eq!(outcome.summary.messages.unique, 1);
    }

    #[test]
    fn missing_store_yields_zero_summary() {
        let scanner = Scanner::builder()
            .store_path("/nonexistent/mailbox-12345.json")
            .build()
            .unwrap();

        let outcome = scanner.run();

        assert!(matches!(outcome.fatal, Some(StoreError::NotFound { .. })));
        assert_eq!(outcome.summary, ScanSummary::empty());
    }

    #[test]
    fn root_failure_still_releases_the_store() {
        let closes = Rc::new(Cell::new(0));
        let store = NoRootStore {
            closes: Rc::clone(&closes),
        };

        let outcome = Scanner::scan_store(Box::new(store), &null_sender());

        assert!(matches!(outcome.fatal, Some(StoreError::RootFolder { .. })));
        assert_eq!(outcome.summary.messages.unique, 0);
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn store_events_bracket_the_scan() {
        let (sender, receiver) = EventChannel::new();
        let store = SnapshotStore::new("fixture", FolderRecord::new("Top"));

        Scanner::scan_store(Box::new(store), &sender);

        let events = receiver.drain();
        assert!(matches!(events.first(), Some(Event::Store(StoreEvent::Opened { .. }))));
        assert!(matches!(events.last(), Some(Event::Store(StoreEvent::Closed { .. }))));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Scan(ScanEvent::Completed { .. }))));
    }
}
