//! Oplog entry domain types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use xxhash_rust::xxh3::xxh3_64;

use crate::timestamp::format_ghostwriter_timestamp;

/// Tool name recorded on every entry extracted from a LokiC2 transcript
pub const TOOL_NAME: &str = "LokiC2";

/// Process-wide values stamped onto every extracted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySource {
    /// Host the payload was executing on
    pub source_ip: String,
    /// Ghostwriter oplog id the entries belong to
    pub oplog: i64,
}

impl EntrySource {
    pub fn new(source_ip: impl Into<String>, oplog: i64) -> Self {
        Self {
            source_ip: source_ip.into(),
            oplog,
        }
    }
}

/// A single command executed through the C2, ready to be sent to Ghostwriter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub start_date: NaiveDateTime,
    pub user_context: String,
    pub command: String,
    pub tool: String,
    pub source_ip: String,
    pub oplog: i64,
    pub entry_identifier: String,
    pub extra_fields: Map<String, Value>,
    pub description: String,
    pub comments: Option<String>,
}

impl LogEntry {
    /// Builds an entry from the captured transcript fields
    ///
    /// All derived fields (tool, identifier, description) are filled in here
    /// so that every entry is constructed the same way.
    pub fn new(
        start_date: NaiveDateTime,
        user_context: impl Into<String>,
        command: impl Into<String>,
        source: &EntrySource,
    ) -> Self {
        let user_context = user_context.into();
        let command = command.into();
        let entry_identifier = entry_identifier(
            &user_context,
            &format_ghostwriter_timestamp(&start_date),
            &command,
        );

        Self {
            start_date,
            user_context,
            description: command.clone(),
            command,
            tool: TOOL_NAME.to_string(),
            source_ip: source.source_ip.clone(),
            oplog: source.oplog,
            entry_identifier,
            extra_fields: Map::new(),
            comments: None,
        }
    }

    /// Start date in the `YYYY-MM-DD HH:MM:SS` form Ghostwriter expects
    pub fn start_date_string(&self) -> String {
        format_ghostwriter_timestamp(&self.start_date)
    }
}

/// Builds the deduplication key for an entry
///
/// The key is `{user}_{start_date}_{hash}` where the hash only depends on the
/// command bytes, so the same transcript line yields the same key on every run.
pub fn entry_identifier(user_context: &str, start_date: &str, command: &str) -> String {
    format!("{}_{}_{}", user_context, start_date, command_hash(command))
}

/// xxh3-64 of the command text as 16 lowercase hex digits
pub fn command_hash(command: &str) -> String {
    format!("{:016x}", xxh3_64(command.as_bytes()))
}
