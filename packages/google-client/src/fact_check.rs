//! Fact Check Tools API (`claims:search`).

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{GoogleApiError, Result};
use crate::retry::RetryPolicy;

pub const FACT_CHECK_BASE_URL: &str = "https://factchecktools.googleapis.com/v1alpha1";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSearchResponse {
    #[serde(default)]
    pub claims: Vec<Claim>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub text: Option<String>,
    pub claimant: Option<String>,
    #[serde(default)]
    pub claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReview {
    pub publisher: Option<Publisher>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub textual_rating: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Publisher {
    pub name: Option<String>,
    pub site: Option<String>,
}

/// Fact Check Tools API client.
pub struct FactCheckClient {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    language_code: String,
    retry: RetryPolicy,
}

impl FactCheckClient {
    /// Create a client with a 15 s timeout and 3 attempts at 0.5 s backoff.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key: String = api_key.into();
        if api_key.is_empty() {
            return Err(GoogleApiError::Config("Fact Check API key is required".into()));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| GoogleApiError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: SecretString::from(api_key),
            base_url: FACT_CHECK_BASE_URL.to_string(),
            language_code: "en".to_string(),
            retry: RetryPolicy::new(3, Duration::from_millis(500)),
        })
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search published fact-checks matching `query`, at most `page_size` claims.
    pub async fn search_claims(&self, query: &str, page_size: usize) -> Result<ClaimSearchResponse> {
        let endpoint = format!("{}/claims:search", self.base_url);
        let page_size = page_size.to_string();

        let response = self
            .retry
            .send("fact_check", || {
                self.http_client.get(&endpoint).query(&[
                    ("query", query),
                    ("pageSize", page_size.as_str()),
                    ("languageCode", self.language_code.as_str()),
                    ("key", self.api_key.expose_secret()),
                ])
            })
            .await?;

        let parsed: ClaimSearchResponse = response
            .json()
            .await
            .map_err(|e| GoogleApiError::Parse(e.without_url().to_string()))?;

        debug!(claims = parsed.claims.len(), "Fact Check search");
        Ok(parsed)
    }
}
