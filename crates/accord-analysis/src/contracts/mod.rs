//! Contract analysis: grouping matched calls per endpoint, schema diffs,
//! confidence and health scores, and mismatch summaries.

pub mod analyzer;
pub mod confidence;
pub mod summary;
pub mod types;

pub use analyzer::{analyze, AnalysisOptions, ContractAnalyzer};
pub use confidence::{contract_confidence, contract_health};
pub use summary::{count_by_severity, severity_of, summarize, MismatchCounts};
pub use types::*;
