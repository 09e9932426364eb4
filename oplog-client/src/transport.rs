//! HTTP transport
//!
//! The client talks to Ghostwriter through the [`Transport`] trait so that the
//! submission logic can be exercised without a network.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

/// Status and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST and returns the response, blocking until it completes
pub trait Transport {
    /// Posts `body` to `url` with a bearer token
    ///
    /// # Arguments
    /// * `url` - Full endpoint URL
    /// * `bearer_token` - Token sent as `Authorization: Bearer <token>`
    /// * `body` - JSON request body
    fn post_json(&self, url: &str, bearer_token: &str, body: &Value) -> Result<TransportResponse>;
}

/// reqwest-backed implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport, optionally skipping TLS certificate verification
    pub fn new(insecure_skip_verify: bool) -> Result<Self> {
        if insecure_skip_verify {
            warn!("TLS certificate verification is disabled for Ghostwriter requests");
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(insecure_skip_verify)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, bearer_token: &str, body: &Value) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", bearer_token))
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(TransportResponse { status, body })
    }
}
