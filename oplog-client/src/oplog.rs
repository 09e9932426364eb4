//! Oplog entry submission

use oplog_core::LogEntry;
use oplog_core::dto::mutation::{GraphqlRequest, GraphqlResponse};
use tracing::{debug, warn};

use crate::GhostwriterClient;
use crate::error::{ClientError, Result};
use crate::transport::Transport;

/// Totals for a [`GhostwriterClient::submit_all`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl<T: Transport> GhostwriterClient<T> {
    // =============================================================================
    // Oplog Entries
    // =============================================================================

    /// Insert a single entry into the oplog
    ///
    /// A submission only counts as successful when the status is 2xx and the
    /// body carries no GraphQL `errors` key.
    ///
    /// # Returns
    /// The ids Ghostwriter assigned to the inserted rows
    pub fn submit_entry(&self, entry: &LogEntry) -> Result<Vec<i64>> {
        let url = self.graphql_url();
        let request = GraphqlRequest::insert_oplog_entry(entry, &self.operator_name);
        let body = serde_json::to_value(&request)?;

        debug!(
            url = %url,
            entry_identifier = %entry.entry_identifier,
            "Posting oplog entry"
        );
        let response = self.transport.post_json(&url, &self.api_token, &body)?;

        if !response.is_success() {
            return Err(ClientError::api_error(response.status, response.body));
        }

        let parsed: GraphqlResponse =
            serde_json::from_str(&response.body).map_err(|e| ClientError::ParseError {
                message: format!("Failed to parse JSON response: {}", e),
                body: response.body.clone(),
            })?;

        if parsed.has_errors() {
            return Err(ClientError::GraphqlErrors {
                body: response.body,
            });
        }

        Ok(parsed.returned_ids())
    }

    /// Insert every entry, one request each, in order
    ///
    /// Each entry is attempted exactly once. A failed entry, including a
    /// transport failure, is handed to `on_result` and the next entry is
    /// still attempted.
    pub fn submit_all<F>(&self, entries: &[LogEntry], mut on_result: F) -> SubmitReport
    where
        F: FnMut(&LogEntry, &Result<Vec<i64>>),
    {
        let mut report = SubmitReport::default();

        for entry in entries {
            let result = self.submit_entry(entry);
            report.attempted += 1;

            match &result {
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    warn!(
                        entry_identifier = %entry.entry_identifier,
                        "Failed to submit oplog entry: {}", e
                    );
                    report.failed += 1;
                }
            }

            on_result(entry, &result);
        }

        report
    }
}
