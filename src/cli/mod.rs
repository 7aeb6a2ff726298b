//! # CLI Module
//!
//! Command-line interface for the mail store duplicate finder.
//!
//! ## Usage
//! ```bash
//! # Scan a JSON snapshot
//! mail-dedup scan ~/exports/mailbox.json
//!
//! # Scan a store directory and list every skipped item
//! mail-dedup scan ~/exports/mailbox --verbose
//! ```

use clap::{Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use mail_dedup::core::reporter::{CategoryCounts, ScanSummary};
use mail_dedup::core::scan::{ScanOutcome, Scanner};
use mail_dedup::error::Result;
use mail_dedup::events::{Event, EventChannel, ScanEvent};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Mail Dedup - Count duplicate messages and meeting notices
#[derive(Parser, Debug)]
#[command(name = "mail-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a mail store for duplicates
    Scan {
        /// Mail store to scan (.json snapshot or store directory)
        store: PathBuf,

        /// List every skipped item and why
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    mail_dedup::init_tracing();

    match cli.command {
        Commands::Scan { store, verbose } => run_scan(store, verbose),
    }
}

fn run_scan(store: PathBuf, verbose: bool) -> Result<()> {
    let term = Term::stderr();

    term.write_line(&format!(
        "{} {}",
        style("Mail Dedup").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();

    let scanner = Scanner::builder().store_path(store).build()?;

    let (sender, receiver) = EventChannel::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} items {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    let spinner_clone = spinner.clone();

    // The scan stays on this thread; only progress display runs here
    let event_thread = thread::spawn(move || {
        let mut folder = String::new();
        let mut skipped = 0usize;
        for event in receiver.iter() {
            match event {
                Event::Scan(ScanEvent::Started { root, .. }) => {
                    spinner_clone.println(format!("Analyzing folder '{}'...", root));
                }
                Event::Scan(ScanEvent::FolderEntered { path, .. }) => {
                    folder = path;
                    spinner_clone.set_message(progress_message(&folder, skipped));
                }
                Event::Scan(ScanEvent::ItemProcessed(p)) => {
                    if p.disposition.is_skip() {
                        skipped += 1;
                        spinner_clone.set_message(progress_message(&folder, skipped));
                    }
                    spinner_clone.set_position(p.items_visited as u64);
                }
                Event::Scan(ScanEvent::Completed { .. }) => {
                    spinner_clone.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let outcome = scanner.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    spinner.finish_and_clear();

    print_results(&term, &outcome, verbose);

    Ok(())
}

fn progress_message(folder: &str, skipped: usize) -> String {
    if skipped == 0 {
        folder.to_string()
    } else {
        format!("{} ({} skipped)", folder, skipped)
    }
}

fn print_results(term: &Term, outcome: &ScanOutcome, verbose: bool) {
    if let Some(error) = &outcome.fatal {
        let cross = style("✗").red().bold();
        let hint = "The scan could not start. Check that the mail store path is correct.";
        term.write_line(&format!("{} {}", cross, hint)).ok();
        term.write_line(&format!("  {}", style(error).dim())).ok();
    } else if let Some(store) = &outcome.summary.store {
        let tick = style("✓").green().bold();
        term.write_line(&format!("{} Closed mail store '{}'", tick, store)).ok();
    }

    print_summary(term, &outcome.summary, verbose);
}

fn print_summary(term: &Term, summary: &ScanSummary, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&style("Results").bold().underlined().to_string()).ok();

    print_category(term, "Messages", &summary.messages);
    print_category(term, "Meetings (requests and cancellations)", &summary.meetings);

    term.write_line("").ok();
    term.write_line(&style("Other").bold().to_string()).ok();
    let skipped = style(summary.skipped.total()).yellow();
    term.write_line(&format!("  - Skipped: {}", skipped)).ok();

    if summary.skipped.total() > 0 {
        let breakdown = format!(
            "{} not deduplicated, {} could not be read",
            summary.skipped.unclassified, summary.skipped.failed
        );
        term.write_line(&format!("    {}", style(breakdown).dim())).ok();
    }

    if verbose && !summary.diagnostics.is_empty() {
        term.write_line("").ok();
        term.write_line(&style("Skipped items").bold().to_string()).ok();
        for diagnostic in &summary.diagnostics {
            let subject = diagnostic
                .subject
                .as_deref()
                .map(|s| format!("\"{}\"", s))
                .unwrap_or_else(|| style("(folder)").dim().to_string());
            term.write_line(&format!(
                "  {} {} {}",
                style(&diagnostic.folder).cyan(),
                subject,
                style(&diagnostic.reason).dim()
            ))
            .ok();
        }
    }

    if summary.store.is_some() {
        term.write_line("").ok();
        let footer = format!(
            "{} items in {:.1}s. Nothing in the store was changed.",
            summary.items_visited,
            summary.duration_ms as f64 / 1000.0
        );
        term.write_line(&style(footer).dim().to_string()).ok();
    }
}

fn print_category(term: &Term, title: &str, counts: &CategoryCounts) {
    let processed = style(format!("({} processed)", counts.processed())).dim();
    term.write_line("").ok();
    term.write_line(&format!("{} {}", style(title).bold(), processed)).ok();
    term.write_line(&format!("  - Unique: {}", style(counts.unique).cyan())).ok();
    term.write_line(&format!("  - Duplicates: {}", style(counts.duplicate).yellow())).ok();
}
