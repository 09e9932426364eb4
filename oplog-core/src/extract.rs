//! Transcript extraction
//!
//! Reads a LokiC2 HTML/text transcript and turns every command line into a
//! [`LogEntry`]. Lines that are not command lines, or whose timestamp cannot
//! be parsed, are skipped without error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::domain::entry::{EntrySource, LogEntry};
use crate::timestamp::parse_loki_timestamp;

/// Matches `<ts span>[ts]</span> <user span>user</span>$ command`
static COMMAND_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^<span style="color:#acdff2">\[(.*?)\]</span> "#,
        r#"<span style="color:#ff0000">(.*?)</span>\$ (.*)"#,
    ))
    .expect("command line pattern is valid")
});

/// Result type alias for extraction
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that abort an extraction run
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Transcript could not be opened or read
    #[error("failed to read transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Line counts gathered while extracting a transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub matched: usize,
    pub skipped_no_match: usize,
    pub skipped_bad_timestamp: usize,
}

impl ExtractStats {
    pub fn skipped(&self) -> usize {
        self.skipped_no_match + self.skipped_bad_timestamp
    }
}

enum LineOutcome {
    Entry(LogEntry),
    NoMatch,
    BadTimestamp,
}

/// Turns transcript lines into log entries
#[derive(Debug, Clone)]
pub struct Extractor {
    source: EntrySource,
}

impl Extractor {
    pub fn new(source: EntrySource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &EntrySource {
        &self.source
    }

    /// Parses a single transcript line
    ///
    /// Returns `None` for anything that is not a well-formed command line.
    pub fn parse_line(&self, line: &str) -> Option<LogEntry> {
        match self.classify(line) {
            LineOutcome::Entry(entry) => Some(entry),
            LineOutcome::NoMatch | LineOutcome::BadTimestamp => None,
        }
    }

    fn classify(&self, line: &str) -> LineOutcome {
        let Some(caps) = COMMAND_LINE.captures(line.trim()) else {
            return LineOutcome::NoMatch;
        };

        let (raw_time, username, command) = (&caps[1], &caps[2], &caps[3]);
        match parse_loki_timestamp(raw_time) {
            Some(start_date) => {
                LineOutcome::Entry(LogEntry::new(start_date, username, command, &self.source))
            }
            None => LineOutcome::BadTimestamp,
        }
    }

    /// Extracts entries from a transcript file, in file order
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Vec<LogEntry>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.extract_reader_with_stats(BufReader::new(file), path)
            .map(|(entries, _)| entries)
    }

    /// Extracts entries from any buffered reader, in read order
    pub fn extract_reader<R: BufRead>(&self, reader: R) -> Result<Vec<LogEntry>> {
        self.extract_reader_with_stats(reader, Path::new("<reader>"))
            .map(|(entries, _)| entries)
    }

    /// Like [`Extractor::extract_reader`] but also reports how many lines were skipped
    ///
    /// `path` is only used to label I/O errors.
    pub fn extract_reader_with_stats<R: BufRead>(
        &self,
        reader: R,
        path: &Path,
    ) -> Result<(Vec<LogEntry>, ExtractStats)> {
        let mut entries = Vec::new();
        let mut stats = ExtractStats::default();

        for line in reader.lines() {
            let line = line.map_err(|source| ExtractError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            match self.classify(&line) {
                LineOutcome::Entry(entry) => {
                    stats.matched += 1;
                    entries.push(entry);
                }
                LineOutcome::NoMatch => stats.skipped_no_match += 1,
                LineOutcome::BadTimestamp => {
                    debug!(line = %line.trim(), "Skipping command line with unparseable timestamp");
                    stats.skipped_bad_timestamp += 1;
                }
            }
        }

        debug!(
            path = %path.display(),
            matched = stats.matched,
            skipped_no_match = stats.skipped_no_match,
            skipped_bad_timestamp = stats.skipped_bad_timestamp,
            "Finished scanning transcript lines"
        );

        Ok((entries, stats))
    }
}
