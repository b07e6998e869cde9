//! Fusion of the three independent signals into one verdict.

use super::models::{
    AnalysisResult, CredibilityVerdict, FactReference, Flag, ThreatVerdict, Verdict,
};

/// Scores at or above this are Verified.
pub const VERIFIED_MIN_SCORE: u8 = 80;
/// Scores at or below this are Unreliable.
pub const UNRELIABLE_MAX_SCORE: u8 = 40;

const EXTRACTION_FAILED_SUMMARY: &str = "Failed to extract content from URL.";
const EXTRACTION_FAILED_REASONING: &str = "Could not perform analysis due to a critical error.";

/// Map a credibility score to its verdict category, absent any threat.
pub fn verdict_for_score(score: u8) -> Verdict {
    if score >= VERIFIED_MIN_SCORE {
        Verdict::Verified
    } else if score <= UNRELIABLE_MAX_SCORE {
        Verdict::Unreliable
    } else {
        Verdict::Caution
    }
}

/// Combine the screener, judge and lookup results.
///
/// Any screening outcome other than a clean check overrides the model,
/// error sentinels included: score 0, Danger. Otherwise the judge's score
/// decides the category. Summary, flags and fact references
/// are carried over unchanged.
pub fn fuse(
    threat: ThreatVerdict,
    credibility: CredibilityVerdict,
    fact_checks: Vec<FactReference>,
) -> AnalysisResult {
    let (veracity_score, verdict) = if threat.is_threat() {
        (0, Verdict::Danger)
    } else {
        let score = credibility.credibility_score;
        (score, verdict_for_score(score))
    };

    AnalysisResult {
        veracity_score,
        verdict,
        summary: credibility.summary.clone(),
        flags: credibility.detected_flags.clone(),
        safe_browsing: threat,
        fact_checks,
        raw_ai_analysis: credibility,
    }
}

/// Result reported when the page yielded no analyzable text.
pub fn extraction_failed_result() -> AnalysisResult {
    AnalysisResult {
        veracity_score: 0,
        verdict: Verdict::Unreliable,
        summary: EXTRACTION_FAILED_SUMMARY.to_string(),
        flags: vec![Flag::AnalysisFailed],
        safe_browsing: ThreatVerdict::api_error(EXTRACTION_FAILED_SUMMARY),
        fact_checks: Vec::new(),
        raw_ai_analysis: CredibilityVerdict {
            credibility_score: 0,
            summary: EXTRACTION_FAILED_SUMMARY.to_string(),
            detected_flags: vec![Flag::AnalysisFailed],
            reasoning: EXTRACTION_FAILED_REASONING.to_string(),
        },
    }
}
