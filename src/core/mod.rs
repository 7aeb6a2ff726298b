//! # Core Module
//!
//! The UI-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `store` - Mail store traits and bundled adapters
//! - `classifier` - Decides what an item is and builds its canonical key
//! - `fingerprint` - Hashes canonical keys
//! - `registry` - Per-scan dedup sets and counters
//! - `scan` - Traversal, failure isolation and orchestration
//! - `reporter` - The end-of-scan summary

pub mod classifier;
pub mod fingerprint;
pub mod registry;
pub mod reporter;
pub mod scan;
pub mod store;

// Re-export commonly used types
pub use classifier::{CanonicalKey, Category};
pub use fingerprint::Fingerprint;
pub use reporter::ScanSummary;
pub use scan::{ScanOutcome, Scanner};
