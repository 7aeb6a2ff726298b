//! # Classifier Module
//!
//! Decides what an item is and builds the key that identifies it.
//!
//! ## Item Classes
//! | code | variant |
//! |---|---|
//! | 43 | Message |
//! | 53 | Meeting request |
//! | 56 | Meeting cancellation |
//! | other | Not deduplicated |
//!
//! `classify` is the only place that looks at class codes. It reads the
//! fields a variant needs, so a failure to read any of them surfaces here.

mod key;

pub use key::{meeting_key, message_key, CanonicalKey};

use crate::core::store::{MailItem, Occurrence, Timestamp};
use crate::error::ItemError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MESSAGE_CLASS: u32 = 43;
pub const MEETING_REQUEST_CLASS: u32 = 53;
pub const MEETING_CANCELLATION_CLASS: u32 = 56;

/// Dedup category; each has its own independent registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Message,
    Meeting,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Message => write!(f, "message"),
            Category::Meeting => write!(f, "meeting"),
        }
    }
}

/// Item variant derived from the class code alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Message,
    MeetingNotice,
    Other(u32),
}

impl ItemKind {
    pub fn from_class(code: u32) -> Self {
        match code {
            MESSAGE_CLASS => ItemKind::Message,
            MEETING_REQUEST_CLASS | MEETING_CANCELLATION_CLASS => ItemKind::MeetingNotice,
            other => ItemKind::Other(other),
        }
    }
}

/// Fields of a message that take part in its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    pub sent_on: Timestamp,
    pub sender_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MessageFields {
    /// Read the identity fields from an item
    pub fn read(item: &dyn MailItem) -> Result<Self, ItemError> {
        Ok(Self {
            sent_on: item.sent_on()?,
            sender_name: item.sender_name()?,
            to: item.to()?,
            subject: item.subject()?,
            body: item.body()?,
        })
    }
}

/// An item after classification, carrying what its key needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Message(MessageFields),
    Meeting(Occurrence),
    Other { class: u32 },
}

/// The dedup identity of a classified item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Keyed { category: Category, key: CanonicalKey },
    Unclassified { class: u32 },
}

impl Classified {
    /// Build the canonical key with the variant's own key function
    pub fn identity(&self) -> Identity {
        match self {
            Classified::Message(fields) => Identity::Keyed {
                category: Category::Message,
                key: message_key(fields),
            },
            Classified::Meeting(occurrence) => Identity::Keyed {
                category: Category::Meeting,
                key: meeting_key(occurrence),
            },
            Classified::Other { class } => Identity::Unclassified { class: *class },
        }
    }
}

/// Classify an item and read its identity fields.
///
/// Meeting notices resolve their occurrence here; a failed lookup is an
/// error, not an unclassified item.
pub fn classify(item: &dyn MailItem) -> Result<Classified, ItemError> {
    match ItemKind::from_class(item.class()?) {
        ItemKind::Message => Ok(Classified::Message(MessageFields::read(item)?)),
        ItemKind::MeetingNotice => Ok(Classified::Meeting(item.resolve_occurrence()?)),
        ItemKind::Other(class) => Ok(Classified::Other { class }),
    }
}
