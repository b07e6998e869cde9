use serde::{Deserialize, Serialize};
use url::Url;

/// A published fact-check related to the analyzed URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactReference {
    pub publisher: String,
    pub claim: String,
    pub rating: String,
    pub review_url: Url,
}
