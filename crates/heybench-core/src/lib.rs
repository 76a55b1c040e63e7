pub mod compare;
pub mod error;
pub mod plan;
pub mod report;
pub mod runner;

pub use compare::{compare, format_count, format_seconds, Comparison, ComparisonRow};
pub use error::HeybenchError;
pub use report::{parse, BenchmarkMetrics};
