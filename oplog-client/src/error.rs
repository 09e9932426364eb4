//! Error types for the Ghostwriter client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when submitting entries to Ghostwriter
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Transport failed for a reason other than reqwest (used by custom transports)
    #[error("Transport error: {0}")]
    Transport(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// GraphQL answered with an `errors` list
    #[error("GraphQL error: {body}")]
    GraphqlErrors {
        /// Raw response body
        body: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {message}")]
    ParseError {
        message: String,
        /// Raw response body
        body: String,
    },

    /// Failed to encode the request body
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Raw response body, when the server answered at all
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::ApiError { message, .. } => Some(message),
            Self::GraphqlErrors { body } | Self::ParseError { body, .. } => Some(body),
            Self::RequestFailed(_) | Self::Transport(_) | Self::Encode(_) => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_body() {
        assert_eq!(
            ClientError::api_error(500, "boom").response_body(),
            Some("boom")
        );
        assert_eq!(
            ClientError::GraphqlErrors {
                body: "{\"errors\":[]}".to_string()
            }
            .response_body(),
            Some("{\"errors\":[]}")
        );
        assert_eq!(
            ClientError::Transport("refused".to_string()).response_body(),
            None
        );
    }

    #[test]
    fn test_status_classes() {
        assert!(ClientError::api_error(401, "").is_client_error());
        assert!(!ClientError::api_error(401, "").is_server_error());
        assert!(ClientError::api_error(502, "").is_server_error());
    }
}
