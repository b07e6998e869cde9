//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by the analysis
//! activity. All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;

use extraction::{ContentExtractor, HttpExtractor, UrlValidator};
use google_client::{FactCheckClient, GenerativeLanguageClient, SafeBrowsingClient};

use crate::config::Config;
use crate::kernel::{
    BaseCredibilityJudge, BaseFactChecker, BaseThreatScreener, GeminiJudge, GoogleFactChecker,
    SafeBrowsingScreener,
};

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// SSRF screen run before any fetch
    pub validator: Arc<UrlValidator>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub threat_screener: Arc<dyn BaseThreatScreener>,
    pub credibility_judge: Arc<dyn BaseCredibilityJudge>,
    pub fact_checker: Arc<dyn BaseFactChecker>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        validator: Arc<UrlValidator>,
        extractor: Arc<dyn ContentExtractor>,
        threat_screener: Arc<dyn BaseThreatScreener>,
        credibility_judge: Arc<dyn BaseCredibilityJudge>,
        fact_checker: Arc<dyn BaseFactChecker>,
    ) -> Self {
        Self {
            validator,
            extractor,
            threat_screener,
            credibility_judge,
            fact_checker,
        }
    }

    /// Wire the production services from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor =
            HttpExtractor::new().context("Failed to create HTTP content extractor")?;

        let safe_browsing = SafeBrowsingClient::new(config.google_api_key.expose_secret())
            .context("Failed to create Safe Browsing client")?;
        let fact_check = FactCheckClient::new(config.google_api_key.expose_secret())
            .context("Failed to create Fact Check client")?;
        let gemini = GenerativeLanguageClient::new(config.gemini_api_key.expose_secret())
            .context("Failed to create Gemini client")?
            .with_model(config.gemini_model.clone());

        Ok(Self::new(
            Arc::new(UrlValidator::new()),
            Arc::new(extractor),
            Arc::new(SafeBrowsingScreener::new(safe_browsing)),
            Arc::new(GeminiJudge::new(gemini)),
            Arc::new(GoogleFactChecker::new(fact_check)),
        ))
    }
}
