//! Per-item failure isolation.
//!
//! Every item ends up as an `ItemOutcome`. Errors are folded into the skip
//! tally here and never reach the traversal.

use crate::core::classifier::{classify, Category, Identity};
use crate::core::fingerprint::Fingerprint;
use crate::core::registry::{ScanContext, Verdict};
use crate::core::reporter::{Diagnostic, SUBJECT_UNAVAILABLE};
use crate::core::store::MailItem;
use crate::error::ItemError;
use crate::events::ItemDisposition;
use tracing::{trace, warn};

/// What happened to one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Fingerprinted and checked against its category's registry
    Recorded {
        category: Category,
        fingerprint: Fingerprint,
        verdict: Verdict,
    },
    /// Not a class that is deduplicated
    Unclassified { class: u32 },
    /// Reading or resolving the item failed
    Failed { subject: String, error: ItemError },
}

/// An item ready to be recorded
enum Prepared {
    Fingerprinted {
        category: Category,
        fingerprint: Fingerprint,
    },
    Unclassified {
        class: u32,
    },
}

fn prepare(item: &dyn MailItem) -> Result<Prepared, ItemError> {
    Ok(match classify(item)?.identity() {
        Identity::Keyed { category, key } => Prepared::Fingerprinted {
            category,
            fingerprint: Fingerprint::of(&key),
        },
        Identity::Unclassified { class } => Prepared::Unclassified { class },
    })
}

/// Process one item, recording its outcome in `context`
pub fn process_item(item: &dyn MailItem, folder: &str, context: &mut ScanContext) -> ItemOutcome {
    match prepare(item) {
        Ok(Prepared::Fingerprinted {
            category,
            fingerprint,
        }) => {
            let verdict = context.record_and_check(category, fingerprint);
            trace!(folder, %category, %fingerprint, ?verdict, "recorded item");
            ItemOutcome::Recorded {
                category,
                fingerprint,
                verdict,
            }
        }
        Ok(Prepared::Unclassified { class }) => {
            context.record_unclassified();
            trace!(folder, class, "skipping unclassified item");
            ItemOutcome::Unclassified { class }
        }
        Err(error) => {
            let subject = item
                .subject()
                .unwrap_or_else(|_| SUBJECT_UNAVAILABLE.to_string());
            warn!(folder, subject = %subject, error = %error, "skipping item that could not be processed");
            context.record_failure(Diagnostic::item(folder, &subject, error.to_string()));
            ItemOutcome::Failed { subject, error }
        }
    }
}

impl From<&ItemOutcome> for ItemDisposition {
    fn from(outcome: &ItemOutcome) -> Self {
        match outcome {
            ItemOutcome::Recorded {
                category,
                verdict: Verdict::Unique,
                ..
            } => ItemDisposition::Unique(*category),
            ItemOutcome::Recorded {
                category,
                verdict: Verdict::Duplicate,
                ..
            } => ItemDisposition::Duplicate(*category),
            ItemOutcome::Unclassified { class } => ItemDisposition::Unclassified { class: *class },
            ItemOutcome::Failed { subject, error } => ItemDisposition::Failed {
                subject: subject.clone(),
                reason: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{ItemRecord, OccurrenceRecord};

    fn message(body: &str) -> ItemRecord {
        ItemRecord::message("2024-01-05T12:00:00+00:00", "Ana", "Bo", "Status", body)
    }

    #[test]
    fn repeated_message_is_duplicate() {
        let mut context = ScanContext::new();

        let first = process_item(&message("Body"), "Inbox", &mut context);
        let second = process_item(&message("Body"), "Inbox", &mut context);

        assert!(matches!(first, ItemOutcome::Recorded { verdict: Verdict::Unique, .. }));
        assert!(matches!(second, ItemOutcome::Recorded { verdict: Verdict::Duplicate, .. }));
    }

    #[test]
    fn failure_is_counted_with_subject() {
        let mut context = ScanContext::new();
        let mut item = message("Body");
        item.sent_on = Some("yesterday".to_string());

        let outcome = process_item(&item, "Inbox", &mut context);

        assert!(matches!(outcome, ItemOutcome::Failed { ref subject, .. } if subject == "Status"));
        assert_eq!(context.skipped().failed, 1);
        assert_eq!(context.diagnostics()[0].subject.as_deref(), Some("Status"));
        assert_eq!(context.diagnostics()[0].folder, "Inbox");
    }

    #[test]
    fn failure_without_subject_uses_sentinel() {
        let mut context = ScanContext::new();
        let item = ItemRecord::default();

        let outcome = process_item(&item, "Inbox", &mut context);

        assert!(matches!(outcome, ItemOutcome::Failed { ref subject, .. } if subject == "N/A"));
    }

    #[test]
    fn resolution_failure_leaves_meeting_counts_alone() {
        let mut context = ScanContext::new();
        let mut item = ItemRecord::meeting_request("Invitation", OccurrenceRecord::default());
        item.occurrence = None;

        process_item(&item, "Calendar", &mut context);

        assert_eq!(context.registry(Category::Meeting).unique_count(), 0);
        assert_eq!(context.registry(Category::Meeting).duplicate_count(), 0);
        assert_eq!(context.skipped().total(), 1);
    }

    #[test]
    fn other_items_are_skipped_without_diagnostic() {
        let mut context = ScanContext::new();

        let outcome = process_item(&ItemRecord::other(48, "Task"), "Tasks", &mut context);

        assert_eq!(outcome, ItemOutcome::Unclassified { class: 48 });
        assert_eq!(context.skipped().unclassified, 1);
        assert!(context.diagnostics().is_empty());
    }

    #[test]
    fn outcomes_map_to_dispositions() {
        let mut context = ScanContext::new();
        let outcome = process_item(&message("Body"), "Inbox", &mut context);

        assert_eq!(
            ItemDisposition::from(&outcome),
            ItemDisposition::Unique(Category::Message)
        );
    }
}
