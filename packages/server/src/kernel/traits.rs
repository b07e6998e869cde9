// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Fusion and orchestration live in domains/analysis and call these traits.
//
// Naming convention: Base* for trait names (e.g., BaseThreatScreener)

use async_trait::async_trait;

use crate::domains::analysis::models::{CredibilityVerdict, FactReference, ThreatVerdict};
use crate::kernel::credibility_judge::JudgeError;

// =============================================================================
// Threat Screening (fail-open)
// =============================================================================

#[async_trait]
pub trait BaseThreatScreener: Send + Sync {
    /// Screen a URL. Failures come back as an error-sentinel verdict, never
    /// as an error.
    async fn check(&self, url: &str) -> ThreatVerdict;
}

// =============================================================================
// Credibility Judgment (fails loudly)
// =============================================================================

#[async_trait]
pub trait BaseCredibilityJudge: Send + Sync {
    /// Judge the credibility of extracted page text.
    async fn judge(&self, text: &str) -> Result<CredibilityVerdict, JudgeError>;
}

// =============================================================================
// Fact Reference Lookup (fail-soft)
// =============================================================================

#[async_trait]
pub trait BaseFactChecker: Send + Sync {
    /// Find up to `limit` published fact-checks for `query`. Failures yield
    /// an empty list.
    async fn search(&self, query: &str, limit: usize) -> Vec<FactReference>;
}
