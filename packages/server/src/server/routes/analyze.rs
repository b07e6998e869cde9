use axum::{
    body::Bytes,
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde_json::Value;
use url::Url;

use crate::domains::analysis::{analyze_url, AnalysisResult};
use crate::server::app::AppState;
use crate::server::error::{ApiError, FieldError};

/// Validated body of an analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Absolute http(s) URL, normalized by the parser
    pub url: Url,
}

impl AnalysisRequest {
    /// Parse `{"url": "<absolute http(s) URL>"}`, collecting what is wrong.
    pub fn from_json(body: &[u8]) -> Result<Self, Vec<FieldError>> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| vec![FieldError::new(&["body"], e.to_string(), "json_invalid")])?;

        let raw = match value.get("url") {
            Some(Value::String(raw)) => raw,
            Some(_) => {
                return Err(vec![FieldError::new(
                    &["body", "url"],
                    "Input should be a valid string",
                    "string_type",
                )])
            }
            None => {
                return Err(vec![FieldError::new(&["body", "url"], "Field required", "missing")])
            }
        };

        let url = Url::parse(raw).map_err(|e| {
            vec![FieldError::new(
                &["body", "url"],
                format!("Input should be a valid URL, {e}"),
                "url_parsing",
            )]
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(vec![FieldError::new(
                &["body", "url"],
                "URL scheme should be 'http' or 'https'",
                "url_scheme",
            )]);
        }

        Ok(Self { url })
    }
}

/// Whether the request declares a JSON body (`application/json` or `+json`).
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Analysis endpoint
///
/// `POST /` with `{"url": "..."}`. Returns the fused analysis, or a JSON
/// error object: 415 for a non-JSON body, 400 for a bad body or a rejected
/// URL, 500 when the credibility judgment could not be obtained.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    if !is_json(&headers) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let request = AnalysisRequest::from_json(&body).map_err(ApiError::InvalidBody)?;
    let result = analyze_url(request.url.as_str(), &state.deps).await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_normalizes_url() {
        let request = AnalysisRequest::from_json(br#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_body_errors() {
        let cases: [(&[u8], &str); 5] = [
            (b"not json", "json_invalid"),
            (br#"{}"#, "missing"),
            (br#"{"url": 42}"#, "string_type"),
            (br#"{"url": "not-a-url"}"#, "url_parsing"),
            (br#"{"url": "ftp://example.com/file"}"#, "url_scheme"),
        ];

        for (body, kind) in cases {
            let details = AnalysisRequest::from_json(body).unwrap_err();
            assert_eq!(details.len(), 1);
            assert_eq!(details[0].kind, kind);
        }
    }

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        for (value, expected) in [
            ("application/json", true),
            ("Application/JSON; charset=utf-8", true),
            ("application/problem+json", true),
            ("text/plain", false),
            ("application/x-www-form-urlencoded", false),
        ] {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
            assert_eq!(is_json(&headers), expected, "{value}");
        }
    }
}
