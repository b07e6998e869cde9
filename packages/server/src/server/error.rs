//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::domains::analysis::AnalysisError;

/// One problem found in a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &'static str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Body not declared as JSON
    UnsupportedMediaType,
    /// Body is not a valid analysis request
    InvalidBody(Vec<FieldError>),
    /// URL rejected by validation
    InvalidUrl(String),
    /// Anything else; details stay in the logs
    Internal,
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::InvalidInput(e) => Self::InvalidUrl(e.to_string()),
            AnalysisError::Service(e) => {
                tracing::error!(error = %e, "Analysis failed with a service error");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "error": "Invalid request: Content-Type must be application/json" }),
            ),
            Self::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request body", "details": details }),
            ),
            Self::InvalidUrl(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "An internal server error occurred" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
