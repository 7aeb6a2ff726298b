//! Scoped ownership of an opened store.

use super::{MailStore, StoreOpener};
use crate::error::StoreError;
use crate::events::{Event, EventSender, StoreEvent};
use std::path::Path;
use tracing::{debug, info};

/// Holds an open store and releases it when dropped.
///
/// `close` runs exactly once per opened store, on every exit path. A store
/// that failed to open never produces a session, so nothing is released.
pub struct StoreSession {
    store: Box<dyn MailStore>,
    name: String,
    events: EventSender,
}

impl StoreSession {
    /// Open the store at `location` through `opener`
    pub fn open(
        opener: &dyn StoreOpener,
        location: &Path,
        events: &EventSender,
    ) -> Result<Self, StoreError> {
        match opener.open(location) {
            Ok(store) => Ok(Self::attach(store, events)),
            Err(e) => {
                debug!(location = %location.display(), error = %e, "failed to open mail store");
                events.send(Event::Store(StoreEvent::OpenFailed {
                    location: location.to_path_buf(),
                    message: e.to_string(),
                }));
                Err(e)
            }
        }
    }

    /// Take ownership of a store that is already open
    pub fn attach(store: Box<dyn MailStore>, events: &EventSender) -> Self {
        let name = store.display_name();
        info!(store = %name, "opened mail store");
        events.send(Event::Store(StoreEvent::Opened { name: name.clone() }));

        Self {
            store,
            name,
            events: events.clone(),
        }
    }

    pub fn store(&self) -> &dyn MailStore {
        self.store.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        self.store.close();
        info!(store = %self.name, "closed mail store");
        self.events.send(Event::Store(StoreEvent::Closed {
            name: self.name.clone(),
        }));
    }
}
