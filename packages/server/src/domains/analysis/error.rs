use thiserror::Error;

use crate::kernel::JudgeError;
use extraction::SecurityError;

/// Ways an analysis can fail as a whole.
///
/// Screening, lookup and extraction failures never appear here; they are
/// folded into the result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The URL was rejected before any fetch
    #[error(transparent)]
    InvalidInput(#[from] SecurityError),

    /// The credibility judgment could not be obtained
    #[error("credibility analysis failed: {0}")]
    Service(#[from] JudgeError),
}
