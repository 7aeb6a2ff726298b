//! Depth-first folder traversal.
//!
//! Within a folder, items are visited last-to-first, then each sub-folder is
//! walked completely before the next. Visiting items in reverse keeps the
//! remaining indices stable if items are ever removed mid-scan.

use super::isolation::process_item;
use crate::core::registry::ScanContext;
use crate::core::reporter::Diagnostic;
use crate::core::store::MailFolder;
use crate::error::StoreError;
use crate::events::{Event, EventSender, ItemProgress, ScanEvent};
use tracing::{debug, warn};

/// Walk `folder` and everything below it.
///
/// `path` is the display path of `folder`; sub-folders extend it with
/// `/name`. Nothing here returns an error: item failures are isolated per
/// item and enumeration failures per folder.
pub fn walk(folder: &dyn MailFolder, path: &str, context: &mut ScanContext, events: &EventSender) {
    match folder.items() {
        Ok(items) => {
            debug!(folder = path, items = items.len(), "scanning folder");
            events.send(Event::Scan(ScanEvent::FolderEntered {
                path: path.to_string(),
                item_count: items.len(),
            }));

            for (index, item) in items.iter().enumerate().rev() {
                let outcome = process_item(item.as_ref(), path, context);
                let items_visited = context.visit();
                events.send(Event::Scan(ScanEvent::ItemProcessed(ItemProgress {
                    folder: path.to_string(),
                    index,
                    disposition: (&outcome).into(),
                    items_visited,
                })));
            }
        }
        Err(e) => folder_failed(path, e, context, events),
    }

    match folder.folders() {
        Ok(children) => {
            for child in &children {
                let child_path = format!("{}/{}", path, child.name());
                walk(child.as_ref(), &child_path, context, events);
            }
        }
        Err(e) => folder_failed(path, e, context, events),
    }
}

fn folder_failed(path: &str, error: StoreError, context: &mut ScanContext, events: &EventSender) {
    warn!(folder = path, error = %error, "skipping folder contents that could not be enumerated");
    events.send(Event::Scan(ScanEvent::FolderFailed {
        path: path.to_string(),
        message: error.to_string(),
    }));
    context.record_folder_failure(Diagnostic::folder(path, error.to_string()));
}
