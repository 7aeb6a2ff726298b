//! Canonical key construction.
//!
//! The fields and their order define what "the same item" means. Only the
//! body is trimmed, and only at its ends.

use super::MessageFields;
use crate::core::store::{format_timestamp, Occurrence};

/// Ordered, string-coerced fields that identify an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalKey(Vec<String>);

impl CanonicalKey {
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// The parts joined with no separator
    pub fn concatenated(&self) -> String {
        self.0.concat()
    }
}

/// SentOn, SenderName, To, Subject, Body
pub fn message_key(message: &MessageFields) -> CanonicalKey {
    CanonicalKey::new(vec![
        format_timestamp(&message.sent_on),
        message.sender_name.clone(),
        message.to.clone(),
        message.subject.clone(),
        trimmed_body(&message.body),
    ])
}

/// Subject, Start, End, Location, RequiredAttendees, Body of the occurrence
pub fn meeting_key(occurrence: &Occurrence) -> CanonicalKey {
    CanonicalKey::new(vec![
        occurrence.subject.clone(),
        format_timestamp(&occurrence.start),
        format_timestamp(&occurrence.end),
        occurrence.location.clone(),
        occurrence.required_attendees.clone(),
        trimmed_body(&occurrence.body),
    ])
}

fn trimmed_body(body: &str) -> String {
    body.trim_matches(is_body_space).to_string()
}

/// Unicode whitespace plus the information separators U+001C..=U+001F,
/// which mail bodies exported from Windows stores sometimes end with.
fn is_body_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
