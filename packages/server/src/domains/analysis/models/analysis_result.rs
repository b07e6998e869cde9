use serde::{Deserialize, Serialize};

use super::{CredibilityVerdict, FactReference, Flag, ThreatVerdict};

/// Final verdict category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Verified,
    Caution,
    Unreliable,
    Danger,
}

/// Complete analysis of one URL, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub veracity_score: u8,
    pub verdict: Verdict,
    pub summary: String,
    pub flags: Vec<Flag>,
    pub safe_browsing: ThreatVerdict,
    pub fact_checks: Vec<FactReference>,
    pub raw_ai_analysis: CredibilityVerdict,
}
