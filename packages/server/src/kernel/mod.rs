//! Kernel module - server infrastructure and dependencies.

pub mod credibility_judge;
pub mod deps;
pub mod fact_lookup;
pub mod test_dependencies;
pub mod threat_screener;
pub mod traits;

// Service adapters over the Google clients
pub use credibility_judge::{GeminiJudge, JudgeError};
pub use fact_lookup::GoogleFactChecker;
pub use threat_screener::SafeBrowsingScreener;

// Other exports
pub use deps::ServerDeps;
pub use test_dependencies::{
    MockCredibilityJudge, MockFactChecker, MockThreatScreener, SearchCallArgs, TestDependencies,
};
pub use traits::*;
