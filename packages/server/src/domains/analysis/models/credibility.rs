use serde::{Deserialize, Serialize};

/// Misinformation tag attached to a credibility judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    EmotionallyCharged,
    LogicalFallacy,
    NoTrustedSources,
    SensationalistTitle,
    OpinionAsFact,
    VagueClaims,
    /// Set only by the service itself when no analysis could be performed
    AnalysisFailed,
}

impl Flag {
    /// Tags the model is allowed to return.
    pub const MODEL_TAGS: [Flag; 6] = [
        Flag::EmotionallyCharged,
        Flag::LogicalFallacy,
        Flag::NoTrustedSources,
        Flag::SensationalistTitle,
        Flag::OpinionAsFact,
        Flag::VagueClaims,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::EmotionallyCharged => "emotionally_charged",
            Flag::LogicalFallacy => "logical_fallacy",
            Flag::NoTrustedSources => "no_trusted_sources",
            Flag::SensationalistTitle => "sensationalist_title",
            Flag::OpinionAsFact => "opinion_as_fact",
            Flag::VagueClaims => "vague_claims",
            Flag::AnalysisFailed => "analysis_failed",
        }
    }

    /// Parse a tag from model output. `analysis_failed` is not a model tag.
    pub fn from_model_tag(tag: &str) -> Option<Flag> {
        Self::MODEL_TAGS.into_iter().find(|flag| flag.as_str() == tag)
    }
}

/// Structured credibility judgment produced by the generative model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityVerdict {
    /// 0 to 100, higher is more credible
    pub credibility_score: u8,
    pub summary: String,
    pub detected_flags: Vec<Flag>,
    pub reasoning: String,
}
