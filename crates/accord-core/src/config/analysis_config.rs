//! Analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ROOT_MARKER;

/// Configuration for the contract analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Prefix of every mismatch field path. Default: `$`.
    pub root_marker: Option<String>,
    /// Glob patterns over normalized endpoint paths to leave out entirely
    /// (e.g. `/internal/*`).
    #[serde(default)]
    pub ignore_endpoints: Vec<String>,
    /// Report endpoints no call resolved to. Default: true.
    pub report_unmatched_backend: Option<bool>,
    /// Report calls that resolved to no endpoint. Default: true.
    pub report_unmatched_frontend: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective root marker, defaulting to `$`.
    pub fn effective_root_marker(&self) -> &str {
        self.root_marker.as_deref().unwrap_or(DEFAULT_ROOT_MARKER)
    }

    pub fn effective_report_unmatched_backend(&self) -> bool {
        self.report_unmatched_backend.unwrap_or(true)
    }

    pub fn effective_report_unmatched_frontend(&self) -> bool {
        self.report_unmatched_frontend.unwrap_or(true)
    }
}
