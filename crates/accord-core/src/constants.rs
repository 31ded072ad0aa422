//! Shared constants for the Accord contract engine.

/// Accord version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "ACCORD_LOG";

/// Filter used when `ACCORD_LOG` is unset or unparseable.
pub const DEFAULT_LOG_FILTER: &str = "accord=info";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "accord.toml";

/// Root marker that prefixes every mismatch field path.
pub const DEFAULT_ROOT_MARKER: &str = "$";

/// Default confidence floor below which a path match is discarded.
pub const DEFAULT_MIN_MATCH_CONFIDENCE: f64 = 0.0;

/// Wildcard HTTP method, compatible with every method.
pub const METHOD_ANY: &str = "ANY";

/// Backend mount marker (catch-all middleware route).
pub const METHOD_USE: &str = "USE";

// ---- Path match confidence ----

/// Confidence for a pattern match with parameters involved.
pub const MATCH_BASE_CONFIDENCE: f64 = 0.8;

/// Confidence for a verbatim path match.
pub const MATCH_EXACT_CONFIDENCE: f64 = 1.0;

/// Penalty when URL and endpoint have different segment counts.
pub const MATCH_SEGMENT_COUNT_PENALTY: f64 = 0.1;

/// Maximum bonus for literally matching static segments.
pub const MATCH_STATIC_SEGMENT_BONUS: f64 = 0.1;

// ---- Contract confidence ----

pub const CONTRACT_BASE_CONFIDENCE: f64 = 0.5;
pub const CONTRACT_MANY_CALLS_BONUS: f64 = 0.3;
pub const CONTRACT_SEVERAL_CALLS_BONUS: f64 = 0.2;
pub const CONTRACT_SINGLE_CALL_BONUS: f64 = 0.1;
pub const CONTRACT_MANY_CALLS_THRESHOLD: usize = 5;
pub const CONTRACT_SEVERAL_CALLS_THRESHOLD: usize = 2;
pub const CONTRACT_SCHEMA_BONUS: f64 = 0.1;

// ---- Contract health ----

pub const HEALTH_ERROR_PENALTY: f64 = 0.2;
pub const HEALTH_WARNING_PENALTY: f64 = 0.05;
