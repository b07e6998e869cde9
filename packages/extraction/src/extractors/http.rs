//! HTTP-based content extractor.
//!
//! Fetches a single page under time, type and size limits and reduces it to
//! visible text.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::html::visible_text;
use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::ContentExtractor;

/// Limits and identity used by [`HttpExtractor`].
#[derive(Debug, Clone)]
pub struct HttpExtractorConfig {
    /// Connect + read timeout for the whole request
    pub timeout: Duration,
    /// Hard cap on declared and streamed body size
    pub max_bytes: usize,
    /// Identifying User-Agent header
    pub user_agent: String,
    /// Maximum redirects followed
    pub max_redirects: usize,
}

impl Default for HttpExtractorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_bytes: 5 * 1024 * 1024,
            user_agent: "VeracityEngine/1.0 (+http://example.com/bot)".to_string(),
            max_redirects: 10,
        }
    }
}

/// Content extractor that fetches pages over HTTP(S).
///
/// The body is streamed chunk by chunk and the fetch is abandoned as soon as
/// the running total passes `max_bytes`.
///
/// # Example
///
/// ```rust,ignore
/// use extraction::{ContentExtractor, HttpExtractor, UrlValidator};
///
/// let url = UrlValidator::new().validate("https://example.com/").await?;
/// let text = HttpExtractor::new()?.extract(&url).await;
/// ```
pub struct HttpExtractor {
    client: reqwest::Client,
    config: HttpExtractorConfig,
}

impl HttpExtractor {
    /// Create an extractor with default limits.
    pub fn new() -> ExtractResult<Self> {
        Self::with_config(HttpExtractorConfig::default())
    }

    /// Create an extractor with custom limits.
    pub fn with_config(config: HttpExtractorConfig) -> ExtractResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the active limits.
    pub fn config(&self) -> &HttpExtractorConfig {
        &self.config
    }

    /// Fetch `url` and return the decoded HTML body.
    async fn fetch_html(&self, url: &str) -> ExtractResult<String> {
        debug!(url = %url, "HTTP fetch starting");
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_ascii_lowercase());
        if !content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("text/html"))
        {
            return Err(ExtractError::ContentType(content_type));
        }

        let limit = self.config.max_bytes;
        if response
            .content_length()
            .is_some_and(|declared| declared > limit as u64)
        {
            return Err(ExtractError::TooLarge { limit });
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(ExtractError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "HTTP fetch complete");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl ContentExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Option<String> {
        info!(url = %url, "Extracting content");

        let html = match self.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Content extraction abandoned");
                return None;
            }
        };

        match visible_text(&html) {
            Some(text) => {
                debug!(url = %url, chars = text.chars().count(), "Extracted visible text");
                Some(text)
            }
            None => {
                let e = ExtractError::NoContent;
                warn!(url = %url, error = %e, "Content extraction abandoned");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = HttpExtractorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert!(config.user_agent.starts_with("VeracityEngine/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_absent() {
        let extractor = HttpExtractor::with_config(HttpExtractorConfig {
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        // Port 9 (discard) on loopback is closed in test environments.
        assert_eq!(extractor.extract("http://127.0.0.1:9/").await, None);
    }
}
