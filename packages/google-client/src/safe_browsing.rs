//! Safe Browsing v4 Lookup API (`threatMatches:find`).

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::{GoogleApiError, Result};
use crate::retry::RetryPolicy;

pub const SAFE_BROWSING_BASE_URL: &str = "https://safebrowsing.googleapis.com/v4";

/// Threat categories every lookup asks about.
pub const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "UNWANTED_SOFTWARE",
    "POTENTIALLY_HARMFUL_APPLICATION",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            client_id: "veracity-engine".to_string(),
            client_version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<String>,
    pub platform_types: Vec<String>,
    pub threat_entry_types: Vec<String>,
    pub threat_entries: Vec<ThreatEntry>,
}

/// Body of a `threatMatches:find` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindThreatMatchesRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

impl FindThreatMatchesRequest {
    /// Query a single URL against [`THREAT_TYPES`] on any platform.
    pub fn for_url(client: ClientInfo, url: impl Into<String>) -> Self {
        Self {
            client,
            threat_info: ThreatInfo {
                threat_types: THREAT_TYPES.iter().map(|t| t.to_string()).collect(),
                platform_types: vec!["ANY_PLATFORM".to_string()],
                threat_entry_types: vec!["URL".to_string()],
                threat_entries: vec![ThreatEntry { url: url.into() }],
            },
        }
    }
}

/// One reported match, kept as the raw JSON object the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreatMatch(pub Map<String, Value>);

impl ThreatMatch {
    /// The `threatType` field, when present and a string.
    pub fn threat_type(&self) -> Option<&str> {
        self.0.get("threatType").and_then(Value::as_str)
    }
}

/// An empty object means the URL matched nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindThreatMatchesResponse {
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}

/// Safe Browsing Lookup API client.
pub struct SafeBrowsingClient {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    client_info: ClientInfo,
    retry: RetryPolicy,
}

impl SafeBrowsingClient {
    /// Create a client with a 10 s timeout and 3 attempts at 0.5 s backoff.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key: String = api_key.into();
        if api_key.is_empty() {
            return Err(GoogleApiError::Config(
                "Safe Browsing API key is required".into(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GoogleApiError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: SecretString::from(api_key),
            base_url: SAFE_BROWSING_BASE_URL.to_string(),
            client_info: ClientInfo::default(),
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

    pub fn with_client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = client_info;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a single URL.
    pub async fn find_threat_matches(&self, url: &str) -> Result<FindThreatMatchesResponse> {
        let body = FindThreatMatchesRequest::for_url(self.client_info.clone(), url);
        let endpoint = format!("{}/threatMatches:find", self.base_url);

        let response = self
            .retry
            .send("safe_browsing", || {
                self.http_client
                    .post(&endpoint)
                    .query(&[("key", self.api_key.expose_secret())])
                    .json(&body)
            })
            .await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(FindThreatMatchesResponse::default());
        }

        let parsed: FindThreatMatchesResponse =
            serde_json::from_str(&text).map_err(|e| GoogleApiError::Parse(e.to_string()))?;

        debug!(url = %url, matches = parsed.matches.len(), "Safe Browsing lookup");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let body = FindThreatMatchesRequest::for_url(ClientInfo::default(), "https://example.com/");
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["client"]["clientId"], "veracity-engine");
        assert_eq!(value["client"]["clientVersion"], "1.0.0");
        assert_eq!(
            value["threatInfo"]["threatTypes"],
            json!([
                "MALWARE",
                "SOCIAL_ENGINEERING",
                "UNWANTED_SOFTWARE",
                "POTENTIALLY_HARMFUL_APPLICATION"
            ])
        );
        assert_eq!(value["threatInfo"]["platformTypes"], json!(["ANY_PLATFORM"]));
        assert_eq!(value["threatInfo"]["threatEntryTypes"], json!(["URL"]));
        assert_eq!(
            value["threatInfo"]["threatEntries"],
            json!([{ "url": "https://example.com/" }])
        );
    }

    #[test]
    fn test_empty_response_has_no_matches() {
        let parsed: FindThreatMatchesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn test_threat_match_keeps_raw_fields() {
        let parsed: FindThreatMatchesResponse = serde_json::from_value(json!({
            "matches": [{
                "threatType": "MALWARE",
                "platformType": "ANY_PLATFORM",
                "threat": { "url": "http://malware.testing.google.test/" },
                "cacheDuration": "300s"
            }]
        }))
        .unwrap();

        let threat = &parsed.matches[0];
        assert_eq!(threat.threat_type(), Some("MALWARE"));
        assert_eq!(threat.0["cacheDuration"], "300s");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            SafeBrowsingClient::new(""),
            Err(GoogleApiError::Config(_))
        ));
    }
}
