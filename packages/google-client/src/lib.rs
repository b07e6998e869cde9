//! Pure Google REST API clients
//!
//! Minimal clients for the three Google APIs the analyzer talks to, with no
//! domain-specific logic:
//!
//! - [`SafeBrowsingClient`] - Safe Browsing v4 `threatMatches:find`
//! - [`FactCheckClient`] - Fact Check Tools `claims:search`
//! - [`GenerativeLanguageClient`] - Gemini `generateContent`
//!
//! Every client authenticates with an API key sent as the `key` query
//! parameter, applies its own request timeout, and retries transient
//! failures through a shared [`RetryPolicy`].
//!
//! # Example
//!
//! ```rust,ignore
//! use google_client::{FactCheckClient, GenerativeLanguageClient};
//!
//! let gemini = GenerativeLanguageClient::new(gemini_key)?.with_model("gemini-1.5-flash-latest");
//! let text = gemini.generate_text("Rate this article...").await?;
//!
//! let claims = FactCheckClient::new(google_key)?
//!     .search_claims("the moon landing", 5)
//!     .await?;
//! ```

pub mod error;
pub mod fact_check;
pub mod generative_language;
pub mod retry;
pub mod safe_browsing;

pub use error::{GoogleApiError, Result};
pub use fact_check::{Claim, ClaimReview, ClaimSearchResponse, FactCheckClient, Publisher};
pub use generative_language::{
    GenerateContentRequest, GenerateContentResponse, GenerativeLanguageClient, DEFAULT_MODEL,
};
pub use retry::RetryPolicy;
pub use safe_browsing::{
    ClientInfo, FindThreatMatchesResponse, SafeBrowsingClient, ThreatMatch, THREAT_TYPES,
};
