use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use google_client::ThreatMatch;

pub const THREAT_TYPE_UNSPECIFIED: &str = "THREAT_TYPE_UNSPECIFIED";
pub const API_ERROR: &str = "API_ERROR";
pub const CLIENT_ERROR: &str = "CLIENT_ERROR";
pub const UNKNOWN_THREAT: &str = "UNKNOWN";

/// Kind of threat reported for a URL.
///
/// Serialized as the bare threat type string (`"MALWARE"`,
/// `"THREAT_TYPE_UNSPECIFIED"`, `"API_ERROR"`...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThreatKind {
    /// No threat known for the URL
    Unspecified,
    /// The threat service could not be reached or answered with an error
    ApiError,
    /// The lookup failed locally (bad response, unexpected fault)
    ClientError,
    /// A real match, carrying the service's threat type
    Match(String),
}

impl ThreatKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => THREAT_TYPE_UNSPECIFIED,
            Self::ApiError => API_ERROR,
            Self::ClientError => CLIENT_ERROR,
            Self::Match(kind) => kind,
        }
    }
}

impl From<String> for ThreatKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            THREAT_TYPE_UNSPECIFIED => Self::Unspecified,
            API_ERROR => Self::ApiError,
            CLIENT_ERROR => Self::ClientError,
            _ => Self::Match(value),
        }
    }
}

impl From<ThreatKind> for String {
    fn from(kind: ThreatKind) -> Self {
        match kind {
            ThreatKind::Match(kind) => kind,
            other => other.as_str().to_string(),
        }
    }
}

/// Outcome of screening a URL against the threat-intelligence service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatVerdict {
    pub threat_type: ThreatKind,
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl ThreatVerdict {
    pub fn new(threat_type: ThreatKind, details: Map<String, Value>) -> Self {
        Self {
            threat_type,
            details,
        }
    }

    /// Nothing matched.
    pub fn safe() -> Self {
        Self::new(ThreatKind::Unspecified, Map::new())
    }

    pub fn api_error(message: &str) -> Self {
        Self::new(ThreatKind::ApiError, error_details(message))
    }

    pub fn client_error(message: &str) -> Self {
        Self::new(ThreatKind::ClientError, error_details(message))
    }

    /// Build a verdict from a reported match; the raw match becomes the details.
    pub fn from_match(threat: ThreatMatch) -> Self {
        let kind = threat.threat_type().unwrap_or(UNKNOWN_THREAT).to_string();
        Self::new(ThreatKind::from(kind), threat.0)
    }

    /// Whether the verdict is anything other than a clean check.
    ///
    /// Error sentinels count: a URL that could not be screened is not
    /// reported as safe.
    pub fn is_threat(&self) -> bool {
        self.threat_type != ThreatKind::Unspecified
    }
}

fn error_details(message: &str) -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("error".to_string(), json!(message));
    details
}
