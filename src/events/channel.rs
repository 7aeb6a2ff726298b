//! Progress channel between a scan and whoever displays it.
//!
//! The scan itself runs on the caller's thread. Its events can be read on
//! any other thread, or collected afterwards with `drain`.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Producer half, held by the scan. Cheap to clone.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Publish `event`. A scan with nobody listening drops it.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Consumer half, held by a UI or a test
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocking iterator that ends once every sender has been dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Everything queued right now, oldest first
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Constructor for linked sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// An unbounded pair; scans never wait on a slow reader.
    pub fn new() -> (EventSender, EventReceiver) {
        let (tx, rx) = unbounded();
        (EventSender { inner: tx }, EventReceiver { inner: rx })
    }
}

/// Sender for runs nobody watches
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StoreEvent;
    use std::thread;

    fn opened(name: &str) -> Event {
        Event::Store(StoreEvent::Opened {
            name: name.to_string(),
        })
    }

    #[test]
    fn events_reach_a_reader_thread() {
        let (sender, receiver) = EventChannel::new();

        let reader = thread::spawn(move || receiver.iter().count());

        sender.send(opened("archive"));
        sender.send(opened("archive"));
        drop(sender);

        assert_eq!(reader.join().unwrap(), 2);
    }

    #[test]
    fn sending_without_a_reader_is_harmless() {
        null_sender().send(opened("archive"));
    }

    #[test]
    fn drain_empties_the_queue_in_order() {
        let (sender, receiver) = EventChannel::new();
        sender.send(opened("a"));
        sender.send(opened("b"));

        let names: Vec<_> = receiver
            .drain()
            .into_iter()
            .filter_map(|e| match e {
                Event::Store(StoreEvent::Opened { name }) => Some(name),
                _ => None,
            })
            .collect();

        assert_eq!(names, vec!["a", "b"]);
        assert!(receiver.drain().is_empty());
    }
}
