//! # Mail Dedup
//!
//! Finds duplicate messages and meeting notices in a mail store without
//! modifying anything it reads.
//!
//! ## Core Philosophy
//! - **Read only** - The store is scanned, never changed
//! - **One bad item never stops a scan** - Failures are counted and explained
//! - **Same content, same fingerprint** - Identity is derived from a fixed set of fields
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - Store adapters, classification, fingerprinting and traversal
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{MailDedupError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. Calling it twice
/// leaves the first subscriber in place.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
