//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::net::IpAddr;

use thiserror::Error;

/// Security-related errors raised while screening a candidate URL.
///
/// The display strings are surfaced verbatim to API callers, so they are
/// phrased for humans rather than for logs.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("Invalid URL scheme. Only 'http' and 'https' are allowed.")]
    DisallowedScheme(String),

    /// URL has no host
    #[error("URL is missing a hostname.")]
    NoHost,

    /// DNS resolution failed or returned no addresses
    #[error("Could not resolve hostname: {0}")]
    DnsResolution(String),

    /// Host resolved into a blocked CIDR range
    #[error("URL hostname resolves to a forbidden IP address: {0}")]
    BlockedAddress(IpAddr),
}

/// Reasons a fetch was abandoned by the content extractor.
///
/// These never leave [`crate::HttpExtractor`]; they are logged and the
/// caller sees an absent result.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// Declared content type is not HTML
    #[error("non-HTML content type: {0:?}")]
    ContentType(Option<String>),

    /// Declared or streamed body exceeded the byte cap
    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// Document parsed but carried no visible body text
    #[error("no visible body text")]
    NoContent,
}

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
