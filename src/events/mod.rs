//! # Events Module
//!
//! Event-driven progress reporting, decoupled from any particular UI.
//!
//! ## Design
//! The core library emits events through channels. The scan itself stays on
//! one thread; a UI may consume events on another.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Scan(ScanEvent::FolderEntered { path, .. }) => println!("Scanning {path}"),
//!             Event::Scan(ScanEvent::ItemProcessed(p)) => println!("{} items", p.items_visited),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! let outcome = scanner.run_with_events(&sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
