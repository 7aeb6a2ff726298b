//! Plain serde records for folders and items.
//!
//! Missing fields deserialize to `None` and read back as
//! `ItemError::FieldUnavailable`, which is how snapshots represent fields the
//! source store could not provide.

use super::{parse_timestamp, MailFolder, MailItem, Occurrence, Timestamp};
use crate::error::{ItemError, StoreError};
use serde::{Deserialize, Serialize};

/// A folder with its items and sub-folders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

impl FolderRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_items(mut self, items: Vec<ItemRecord>) -> Self {
        self.items = items;
        self
    }

    pub fn with_folders(mut self, folders: Vec<FolderRecord>) -> Self {
        self.folders = folders;
        self
    }
}

/// One stored item of any variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub class: Option<u32>,
    pub subject: Option<String>,
    /// RFC 3339
    pub sent_on: Option<String>,
    pub sender_name: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub occurrence: Option<OccurrenceRecord>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub flagged: bool,
}

impl ItemRecord {
    /// A mail message (class 43)
    pub fn message(
        sent_on: &str,
        sender_name: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Self {
        Self {
            class: Some(43),
            subject: Some(subject.to_string()),
            sent_on: Some(sent_on.to_string()),
            sender_name: Some(sender_name.to_string()),
            to: Some(to.to_string()),
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    /// A meeting request (class 53) pointing at `occurrence`
    pub fn meeting_request(subject: &str, occurrence: OccurrenceRecord) -> Self {
        Self {
            class: Some(53),
            subject: Some(subject.to_string()),
            occurrence: Some(occurrence),
            ..Default::default()
        }
    }

    /// A meeting cancellation (class 56) pointing at `occurrence`
    pub fn meeting_cancellation(subject: &str, occurrence: OccurrenceRecord) -> Self {
        Self {
            class: Some(56),
            ..Self::meeting_request(subject, occurrence)
        }
    }

    /// Any other item kind, e.g. a contact or a task
    pub fn other(class: u32, subject: &str) -> Self {
        Self {
            class: Some(class),
            subject: Some(subject.to_string()),
            ..Default::default()
        }
    }
}

/// The calendar entry behind a meeting notice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub subject: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub required_attendees: Option<String>,
    pub body: Option<String>,
}

impl OccurrenceRecord {
    pub fn new(
        subject: &str,
        start: &str,
        end: &str,
        location: &str,
        required_attendees: &str,
        body: &str,
    ) -> Self {
        Self {
            subject: Some(subject.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            location: Some(location.to_string()),
            required_attendees: Some(required_attendees.to_string()),
            body: Some(body.to_string()),
        }
    }

    fn resolve(&self) -> Result<Occurrence, ItemError> {
        Ok(Occurrence {
            subject: text(&self.subject, "occurrence.subject")?,
            start: parse_timestamp("occurrence.start", &text(&self.start, "occurrence.start")?)?,
            end: parse_timestamp("occurrence.end", &text(&self.end, "occurrence.end")?)?,
            location: text(&self.location, "occurrence.location")?,
            required_attendees: text(
                &self.required_attendees,
                "occurrence.required_attendees",
            )?,
            body: text(&self.body, "occurrence.body")?,
        })
    }
}

fn text(value: &Option<String>, field: &'static str) -> Result<String, ItemError> {
    value.clone().ok_or(ItemError::FieldUnavailable { field })
}

impl MailItem for ItemRecord {
    fn class(&self) -> Result<u32, ItemError> {
        self.class.ok_or(ItemError::FieldUnavailable { field: "class" })
    }

    fn subject(&self) -> Result<String, ItemError> {
        text(&self.subject, "subject")
    }

    fn sent_on(&self) -> Result<Timestamp, ItemError> {
        parse_timestamp("sent_on", &text(&self.sent_on, "sent_on")?)
    }

    fn sender_name(&self) -> Result<String, ItemError> {
        text(&self.sender_name, "sender_name")
    }

    fn to(&self) -> Result<String, ItemError> {
        text(&self.to, "to")
    }

    fn body(&self) -> Result<String, ItemError> {
        text(&self.body, "body")
    }

    fn resolve_occurrence(&self) -> Result<Occurrence, ItemError> {
        match &self.occurrence {
            Some(occurrence) => occurrence.resolve(),
            None => Err(ItemError::OccurrenceUnresolved {
                reason: "no associated occurrence".to_string(),
            }),
        }
    }
}

impl MailFolder for FolderRecord {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn items(&self) -> Result<Vec<Box<dyn MailItem + '_>>, StoreError> {
        Ok(self
            .items
            .iter()
            .map(|item| Box::new(item) as Box<dyn MailItem + '_>)
            .collect())
    }

    fn folders(&self) -> Result<Vec<Box<dyn MailFolder + '_>>, StoreError> {
        Ok(self
            .folders
            .iter()
            .map(|folder| Box::new(folder) as Box<dyn MailFolder + '_>)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_as_unavailable() {
        let item: ItemRecord = serde_json::from_str(r#"{"class": 43, "subject": "hi"}"#).unwrap();

        assert_eq!(item.class().unwrap(), 43);
        assert_eq!(item.subject().unwrap(), "hi");
        assert_eq!(
            item.sender_name().unwrap_err(),
            ItemError::FieldUnavailable { field: "sender_name" }
        );
    }

    #[test]
    fn occurrence_without_record_fails_to_resolve() {
        let item = ItemRecord::other(53, "Sync");
        assert!(matches!(
            item.resolve_occurrence(),
            Err(ItemError::OccurrenceUnresolved { .. })
        ));
    }

    #[test]
    fn occurrence_resolves_all_fields() {
        let item = ItemRecord::meeting_request(
            "Invitation: Sync",
            OccurrenceRecord::new(
                "Sync",
                "2024-05-01T10:00:00+00:00",
                "2024-05-01T10:30:00+00:00",
                "Room 4",
                "ana@example.com; bo@example.com",
                "Agenda",
            ),
        );

        let occurrence = item.resolve_occurrence().unwrap();
        assert_eq!(occurrence.subject, "Sync");
        assert_eq!(occurrence.location, "Room 4");
        assert!(occurrence.end > occurrence.start);
    }

    #[test]
    fn cancellation_uses_its_own_class() {
        let occurrence = OccurrenceRecord::default();
        assert_eq!(ItemRecord::meeting_cancellation("x", occurrence).class, Some(56));
    }

    #[test]
    fn folder_enumerates_in_record_order() {
        let folder = FolderRecord::new("Inbox").with_items(vec![
            ItemRecord::other(1, "first"),
            ItemRecord::other(2, "second"),
        ]);

        let subjects: Vec<_> = folder
            .items()
            .unwrap()
            .iter()
            .map(|i| i.subject().unwrap())
            .collect();

        assert_eq!(subjects, vec!["first", "second"]);
    }
}
