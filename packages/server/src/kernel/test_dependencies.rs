// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use extraction::{MockExtractor, StaticResolver, UrlValidator};

use super::credibility_judge::{parse_verdict, JudgeError};
use super::{BaseCredibilityJudge, BaseFactChecker, BaseThreatScreener, ServerDeps};
use crate::domains::analysis::models::{CredibilityVerdict, FactReference, ThreatVerdict};

// =============================================================================
// Mock Threat Screener
// =============================================================================

pub struct MockThreatScreener {
    verdict: ThreatVerdict,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockThreatScreener {
    pub fn new() -> Self {
        Self {
            verdict: ThreatVerdict::safe(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return this verdict for every URL
    pub fn with_verdict(mut self, verdict: ThreatVerdict) -> Self {
        self.verdict = verdict;
        self
    }

    /// Get all URLs that were screened
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockThreatScreener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseThreatScreener for MockThreatScreener {
    async fn check(&self, url: &str) -> ThreatVerdict {
        self.calls.lock().unwrap().push(url.to_string());
        self.verdict.clone()
    }
}

// =============================================================================
// Mock Credibility Judge
// =============================================================================

enum Judgment {
    Verdict(CredibilityVerdict),
    /// Raw model text, run through the real parser
    ModelOutput(String),
    Unavailable,
}

pub struct MockCredibilityJudge {
    judgment: Judgment,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockCredibilityJudge {
    pub fn new() -> Self {
        Self {
            judgment: Judgment::Verdict(CredibilityVerdict {
                credibility_score: 50,
                summary: "Mock summary.".to_string(),
                detected_flags: Vec::new(),
                reasoning: "Mock reasoning.".to_string(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return this verdict for every text
    pub fn with_verdict(mut self, verdict: CredibilityVerdict) -> Self {
        self.judgment = Judgment::Verdict(verdict);
        self
    }

    /// Answer as if the model had replied with `output`
    pub fn with_model_output(mut self, output: &str) -> Self {
        self.judgment = Judgment::ModelOutput(output.to_string());
        self
    }

    /// Fail every call as an unreachable model would
    pub fn unavailable(mut self) -> Self {
        self.judgment = Judgment::Unavailable;
        self
    }

    /// Get all texts that were judged
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockCredibilityJudge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCredibilityJudge for MockCredibilityJudge {
    async fn judge(&self, text: &str) -> Result<CredibilityVerdict, JudgeError> {
        self.calls.lock().unwrap().push(text.to_string());
        match &self.judgment {
            Judgment::Verdict(verdict) => Ok(verdict.clone()),
            Judgment::ModelOutput(output) => parse_verdict(output),
            Judgment::Unavailable => Err(JudgeError::Upstream(
                google_client::GoogleApiError::Network("connection refused".to_string()),
            )),
        }
    }
}

// =============================================================================
// Mock Fact Checker
// =============================================================================

/// Arguments captured from a search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCallArgs {
    pub query: String,
    pub limit: usize,
}

pub struct MockFactChecker {
    references: Vec<FactReference>,
    calls: Arc<Mutex<Vec<SearchCallArgs>>>,
}

impl MockFactChecker {
    pub fn new() -> Self {
        Self {
            references: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a reference to be returned
    pub fn with_reference(mut self, reference: FactReference) -> Self {
        self.references.push(reference);
        self
    }

    /// Get all search calls with their arguments
    pub fn calls(&self) -> Vec<SearchCallArgs> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockFactChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseFactChecker for MockFactChecker {
    async fn search(&self, query: &str, limit: usize) -> Vec<FactReference> {
        self.calls.lock().unwrap().push(SearchCallArgs {
            query: query.to_string(),
            limit,
        });
        self.references.iter().take(limit).cloned().collect()
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub resolver: Arc<StaticResolver>,
    pub extractor: Arc<MockExtractor>,
    pub threat_screener: Arc<MockThreatScreener>,
    pub credibility_judge: Arc<MockCredibilityJudge>,
    pub fact_checker: Arc<MockFactChecker>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(StaticResolver::new()),
            extractor: Arc::new(MockExtractor::new()),
            threat_screener: Arc::new(MockThreatScreener::new()),
            credibility_judge: Arc::new(MockCredibilityJudge::new()),
            fact_checker: Arc::new(MockFactChecker::new()),
        }
    }

    /// Resolve `host` to `ip` during validation
    pub fn resolve(self, host: &str, ip: IpAddr) -> Self {
        self.resolver.add_host(host, ip);
        self
    }

    /// Set a mock content extractor
    pub fn mock_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Set a mock threat screener
    pub fn mock_screener(mut self, screener: MockThreatScreener) -> Self {
        self.threat_screener = Arc::new(screener);
        self
    }

    /// Set a mock credibility judge
    pub fn mock_judge(mut self, judge: MockCredibilityJudge) -> Self {
        self.credibility_judge = Arc::new(judge);
        self
    }

    /// Set a mock fact checker
    pub fn mock_fact_checker(mut self, fact_checker: MockFactChecker) -> Self {
        self.fact_checker = Arc::new(fact_checker);
        self
    }

    /// Convert into ServerDeps for testing. The mocks stay reachable through
    /// `self` for call assertions.
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(UrlValidator::with_resolver(self.resolver.clone())),
            self.extractor.clone(),
            self.threat_screener.clone(),
            self.credibility_judge.clone(),
            self.fact_checker.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
