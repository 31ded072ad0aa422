//! # accord-analysis
//!
//! Contract engine for Accord: discovers implicit API contracts between
//! backend routes and frontend call sites, and reports structural schema
//! mismatches between them.
//!
//! - [`schema`]: recursive type schemas and their structural diff
//! - [`matching`]: route normalization, pattern compilation, and scoring
//! - [`contracts`]: the analyzer that aggregates matches into contracts
//! - [`extractors`]: the registry seam for host-provided source extractors

pub mod contracts;
pub mod extractors;
pub mod matching;
pub mod schema;

pub use contracts::{analyze, AnalysisResult, Contract, ContractAnalyzer};
pub use schema::{FieldMismatch, MismatchKind, SchemaKind, Severity, TypeSchema};
