//! Analysis domain - scores the credibility of a single URL

pub mod activities;
pub mod error;
pub mod fusion;
pub mod models;

pub use activities::analyze_url;
pub use error::AnalysisError;
pub use models::{
    AnalysisResult, CredibilityVerdict, FactReference, Flag, ThreatKind, ThreatVerdict, Verdict,
};
