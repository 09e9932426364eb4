//! Sync command
//!
//! Extracts every command line from a transcript and submits the resulting
//! entries to Ghostwriter, one request per entry.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use oplog_client::{GhostwriterClient, SubmitReport, Transport};
use oplog_core::Extractor;
use tracing::info;

/// Message printed when a transcript has nothing to submit
pub const NO_ENTRIES_MESSAGE: &str = "No valid log entries found.";

/// Runs a full sync of one transcript
///
/// Success lines go to `out`; the raw Ghostwriter response body of every
/// failed submission goes to `err`. Only an unreadable transcript (or a
/// failure to write output) is returned as an error.
pub fn run_sync<T, O, E>(
    input: &Path,
    extractor: &Extractor,
    client: &GhostwriterClient<T>,
    out: &mut O,
    err: &mut E,
) -> Result<SubmitReport>
where
    T: Transport,
    O: Write,
    E: Write,
{
    let entries = extractor
        .extract_file(input)
        .with_context(|| format!("Failed to extract log entries from {}", input.display()))?;

    if entries.is_empty() {
        writeln!(out, "{}", NO_ENTRIES_MESSAGE.yellow())?;
        return Ok(SubmitReport::default());
    }

    info!(
        "Submitting {} entries to {}",
        entries.len(),
        client.graphql_url()
    );

    let mut write_error = None;
    let report = client.submit_all(&entries, |entry, result| {
        let written = match result {
            Ok(_) => writeln!(
                out,
                "{} {}",
                "✓".green(),
                "Successfully posted log entry to Ghostwriter".green()
            ),
            Err(e) => match e.response_body() {
                Some(body) => writeln!(err, "Error posting to Ghostwriter: {}", body),
                None => writeln!(
                    err,
                    "Error posting to Ghostwriter ({}): {}",
                    entry.entry_identifier, e
                ),
            },
        };
        if let Err(e) = written {
            write_error.get_or_insert(e);
        }
    });

    if let Some(e) = write_error {
        return Err(e).context("Failed to write sync output");
    }

    writeln!(
        out,
        "{}",
        format!(
            "Submitted {}/{} entries ({} failed)",
            report.succeeded, report.attempted, report.failed
        )
        .bold()
    )?;

    Ok(report)
}
