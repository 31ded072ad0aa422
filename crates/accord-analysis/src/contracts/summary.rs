//! Stateless helpers for consumers that render mismatches.

use serde::{Deserialize, Serialize};

use crate::schema::{FieldMismatch, MismatchKind, Severity};

/// Severity a mismatch kind is reported with.
pub fn severity_of(kind: MismatchKind) -> Severity {
    kind.severity()
}

/// One line per mismatch: `<severity> <kind> at <path>: <description>`.
pub fn summarize(mismatches: &[FieldMismatch]) -> Vec<String> {
    mismatches
        .iter()
        .map(|m| format!("{} {} at {}: {}", m.severity, m.kind, m.field_path, m.description))
        .collect()
}

/// Mismatch totals per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl MismatchCounts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

pub fn count_by_severity(mismatches: &[FieldMismatch]) -> MismatchCounts {
    mismatches
        .iter()
        .fold(MismatchCounts::default(), |mut counts, m| {
            match m.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
            }
            counts
        })
}
