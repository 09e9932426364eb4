//! Core domain types
//!
//! These types are produced by the extractor and consumed by the client.
//! They live only for the duration of a single sync run.

pub mod entry;
