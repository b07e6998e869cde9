//! Generative Language API (`models/{model}:generateContent`).

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{GoogleApiError, Result};
use crate::retry::RetryPolicy;

pub const GENERATIVE_LANGUAGE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part::text(prompt)],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Generative Language API client bound to one model.
pub struct GenerativeLanguageClient {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl GenerativeLanguageClient {
    /// Create a client for [`DEFAULT_MODEL`] with a 60 s timeout and 3
    /// attempts at 1 s backoff.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key: String = api_key.into();
        if api_key.is_empty() {
            return Err(GoogleApiError::Config("Gemini API key is required".into()));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| GoogleApiError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: SecretString::from(api_key),
            base_url: GENERATIVE_LANGUAGE_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            retry: RetryPolicy::new(3, Duration::from_secs(1)),
        })
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();
        let endpoint = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .retry
            .send("generative_language", || {
                self.http_client
                    .post(&endpoint)
                    .query(&[("key", self.api_key.expose_secret())])
                    .json(request)
            })
            .await?;

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GoogleApiError::Parse(e.without_url().to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );
        Ok(parsed)
    }

    /// Send a single prompt and return the first candidate's text.
    pub async fn generate_text(&self, prompt: impl Into<String>) -> Result<String> {
        let response = self
            .generate_content(&GenerateContentRequest::from_prompt(prompt))
            .await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| GoogleApiError::Parse("No candidate text in Gemini response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(GenerateContentRequest::from_prompt("hello")).unwrap();
        assert_eq!(value, json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
    }

    #[test]
    fn test_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"credibility_score\": 80}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("{\"credibility_score\": 80}"));

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(blocked.first_text(), None);
    }

    #[test]
    fn test_default_model() {
        let client = GenerativeLanguageClient::new("key").unwrap();
        assert_eq!(client.model(), "gemini-1.5-flash-latest");
        assert_eq!(client.with_model("gemini-pro").model(), "gemini-pro");
    }
}
