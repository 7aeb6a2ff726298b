//! # mail-dedup CLI
//!
//! Command-line interface for the mail store duplicate finder.
//!
//! ## Usage
//! ```bash
//! mail-dedup scan ~/exports/mailbox.json
//! mail-dedup scan ~/exports/mailbox-dir --verbose
//! ```

mod cli;

use mail_dedup::Result;

fn main() -> Result<()> {
    cli::run()
}
