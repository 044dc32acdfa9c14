pub mod plan;
pub mod segments;

pub use plan::PlanReport;
pub use segments::SegmentsReport;
