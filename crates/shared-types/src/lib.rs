pub mod record;
pub mod types;

pub use record::{ImpactDetails, NoticeRecord};
pub use types::{Classification, CompensationAssessment, MarketComparison};
