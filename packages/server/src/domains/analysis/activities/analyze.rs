//! URL analysis activity.
//!
//! Validates the URL, extracts page text, then runs threat screening, the
//! credibility judgment and the fact-check lookup concurrently and fuses the
//! three results.

use tracing::{error, info, warn};

use crate::domains::analysis::error::AnalysisError;
use crate::domains::analysis::fusion::{extraction_failed_result, fuse};
use crate::domains::analysis::models::AnalysisResult;
use crate::kernel::{JudgeError, ServerDeps};

/// Maximum fact references requested per analysis.
pub const FACT_CHECK_LIMIT: usize = 5;

/// Analyze one URL end to end.
///
/// Fails only for a rejected URL or a missing credibility judgment. A page
/// without extractable text still yields a (failure-describing) result, and
/// screening or lookup problems are reported inside the result.
pub async fn analyze_url(url: &str, deps: &ServerDeps) -> Result<AnalysisResult, AnalysisError> {
    info!(url = %url, "Starting analysis");

    let url = deps.validator.validate(url).await?;

    let Some(text) = deps.extractor.extract(&url).await else {
        warn!(url = %url, "No content extracted, returning failure result");
        return Ok(extraction_failed_result());
    };

    // The judge is the only branch that can fail; its error aborts the join.
    let screening = async { Ok::<_, JudgeError>(deps.threat_screener.check(&url).await) };
    let judgment = deps.credibility_judge.judge(&text);
    let lookup = async {
        Ok::<_, JudgeError>(deps.fact_checker.search(&url, FACT_CHECK_LIMIT).await)
    };

    let (threat, credibility, fact_checks) = tokio::try_join!(screening, judgment, lookup)
        .map_err(|e| {
            error!(url = %url, error = %e, "Credibility analysis failed, aborting");
            e
        })?;

    let result = fuse(threat, credibility, fact_checks);
    info!(
        url = %url,
        score = result.veracity_score,
        verdict = ?result.verdict,
        "Analysis complete"
    );
    Ok(result)
}
