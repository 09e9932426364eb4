//! Oplog Core
//!
//! Core types and parsing for syncing LokiC2 command transcripts into
//! Ghostwriter oplogs.
//!
//! This crate contains:
//! - Domain types: the `LogEntry` record and the values stamped onto it
//! - DTOs: the GraphQL mutation document and its wire payloads
//! - Extraction: turning transcript lines into `LogEntry` records

pub mod domain;
pub mod dto;
pub mod extract;
pub mod timestamp;

pub use domain::entry::{EntrySource, LogEntry, TOOL_NAME};
pub use extract::{ExtractError, ExtractStats, Extractor};
