pub mod analysis_result;
pub mod credibility;
pub mod fact_reference;
pub mod threat;

pub use analysis_result::*;
pub use credibility::*;
pub use fact_reference::*;
pub use threat::*;
