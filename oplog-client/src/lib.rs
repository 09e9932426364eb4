//! Ghostwriter HTTP Client
//!
//! A small, blocking client for pushing oplog entries into Ghostwriter's
//! GraphQL API.
//!
//! # Example
//!
//! ```no_run
//! use oplog_client::GhostwriterClient;
//! use oplog_core::{EntrySource, Extractor};
//!
//! fn main() -> anyhow::Result<()> {
//!     let extractor = Extractor::new(EntrySource::new("WS01", 1));
//!     let entries = extractor.extract_file("loki.html")?;
//!
//!     let client = GhostwriterClient::new("https://ghostwriter.local", "token", "alice", false)?;
//!     let report = client.submit_all(&entries, |_, _| {});
//!
//!     println!("Submitted {} of {} entries", report.succeeded, report.attempted);
//!     Ok(())
//! }
//! ```

pub mod error;
mod oplog;
pub mod transport;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use oplog::SubmitReport;
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Path of the GraphQL endpoint relative to the Ghostwriter base URL
pub const GRAPHQL_PATH: &str = "/v1/graphql";

/// Client for the Ghostwriter GraphQL API
///
/// Every entry is sent as its own request through the configured transport.
#[derive(Debug, Clone)]
pub struct GhostwriterClient<T: Transport = HttpTransport> {
    /// Base URL of Ghostwriter (e.g., "https://ghostwriter.local")
    base_url: String,
    /// API token sent as a bearer token
    api_token: String,
    /// Operator name recorded on every entry
    operator_name: String,
    transport: T,
}

impl GhostwriterClient<HttpTransport> {
    /// Create a new Ghostwriter client backed by reqwest
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Ghostwriter instance
    /// * `api_token` - Ghostwriter API token
    /// * `operator_name` - Operator recorded on each entry
    /// * `insecure_skip_verify` - Accept invalid TLS certificates
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        operator_name: impl Into<String>,
        insecure_skip_verify: bool,
    ) -> Result<Self> {
        let transport = HttpTransport::new(insecure_skip_verify)?;
        Ok(Self::with_transport(
            base_url,
            api_token,
            operator_name,
            transport,
        ))
    }
}

impl<T: Transport> GhostwriterClient<T> {
    /// Create a client with a custom transport
    ///
    /// This is how tests substitute a stub for the network.
    pub fn with_transport(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        operator_name: impl Into<String>,
        transport: T,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            operator_name: operator_name.into(),
            transport,
        }
    }

    /// Get the base URL of Ghostwriter
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the GraphQL endpoint
    pub fn graphql_url(&self) -> String {
        format!("{}{}", self.base_url, GRAPHQL_PATH)
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GhostwriterClient::new("https://gw.local", "t", "op", false).unwrap();
        assert_eq!(client.base_url(), "https://gw.local");
        assert_eq!(client.graphql_url(), "https://gw.local/v1/graphql");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GhostwriterClient::new("https://gw.local//", "t", "op", false).unwrap();
        assert_eq!(client.base_url(), "https://gw.local");
        assert_eq!(client.graphql_url(), "https://gw.local/v1/graphql");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http = reqwest::blocking::Client::new();
        let client =
            GhostwriterClient::with_transport("https://gw.local", "t", "op", HttpTransport::with_client(http));
        assert_eq!(client.operator_name(), "op");
    }
}
