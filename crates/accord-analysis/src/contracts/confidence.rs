//! Contract-level scores.
//!
//! `contract_confidence` answers "do these calls really belong to this
//! endpoint" and ignores mismatches. `contract_health` answers "is the
//! contract in good shape" and is driven only by mismatches.

use accord_core::constants::{
    CONTRACT_BASE_CONFIDENCE, CONTRACT_MANY_CALLS_BONUS, CONTRACT_MANY_CALLS_THRESHOLD,
    CONTRACT_SCHEMA_BONUS, CONTRACT_SEVERAL_CALLS_BONUS, CONTRACT_SEVERAL_CALLS_THRESHOLD,
    CONTRACT_SINGLE_CALL_BONUS, HEALTH_ERROR_PENALTY, HEALTH_WARNING_PENALTY,
};

use super::summary::count_by_severity;
use crate::schema::FieldMismatch;

/// 0.5 base, +0.3/+0.2/+0.1 for ≥5/≥2/≥1 calls, +0.1 per backend schema
/// (response, request). At most 1.0.
pub fn contract_confidence(call_count: usize, has_response: bool, has_request: bool) -> f64 {
    let mut score = CONTRACT_BASE_CONFIDENCE;

    score += if call_count >= CONTRACT_MANY_CALLS_THRESHOLD {
        CONTRACT_MANY_CALLS_BONUS
    } else if call_count >= CONTRACT_SEVERAL_CALLS_THRESHOLD {
        CONTRACT_SEVERAL_CALLS_BONUS
    } else if call_count >= 1 {
        CONTRACT_SINGLE_CALL_BONUS
    } else {
        0.0
    };

    if has_response {
        score += CONTRACT_SCHEMA_BONUS;
    }
    if has_request {
        score += CONTRACT_SCHEMA_BONUS;
    }

    score.min(1.0)
}

/// 1.0 minus 0.2 per error and 0.05 per warning, clamped to `[0, 1]`.
pub fn contract_health(mismatches: &[FieldMismatch]) -> f64 {
    let counts = count_by_severity(mismatches);
    let penalty = HEALTH_ERROR_PENALTY * counts.errors as f64
        + HEALTH_WARNING_PENALTY * counts.warnings as f64;
    (1.0 - penalty).clamp(0.0, 1.0)
}
