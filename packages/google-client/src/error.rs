//! Error types for the Google API clients.

use thiserror::Error;

/// Result type for Google API client operations.
pub type Result<T> = std::result::Result<T, GoogleApiError>;

/// Google API client errors.
#[derive(Debug, Error)]
pub enum GoogleApiError {
    /// Configuration error (missing API key, HTTP client setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response after retries)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GoogleApiError {
    /// Whether the failure happened on the wire rather than in our handling
    /// of a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }
}

impl From<reqwest::Error> for GoogleApiError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs carry the API key as a query parameter.
        let e = e.without_url();
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
