//! Path matching configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MIN_MATCH_CONFIDENCE;

/// Configuration for the path matcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MatchingConfig {
    /// Matches scoring below this are treated as no match. Default: 0.0.
    pub min_confidence: Option<f64>,
}

impl MatchingConfig {
    /// Returns the effective confidence floor, defaulting to 0.0.
    pub fn effective_min_confidence(&self) -> f64 {
        self.min_confidence.unwrap_or(DEFAULT_MIN_MATCH_CONFIDENCE)
    }
}
