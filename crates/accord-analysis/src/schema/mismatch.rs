//! Field-level mismatch records.

use accord_core::types::MismatchId;
use serde::{Deserialize, Serialize};

/// Classification of a structural divergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// The backend provides a field this call site does not read.
    MissingInFrontend,
    /// The frontend reads a field the backend does not provide.
    MissingInBackend,
    TypeMismatch,
    /// Optional on the backend, required by the frontend.
    OptionalityMismatch,
    /// Nullable on the backend, not nullable on the frontend.
    NullabilityMismatch,
}

impl MismatchKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingInFrontend => "missing_in_frontend",
            Self::MissingInBackend => "missing_in_backend",
            Self::TypeMismatch => "type_mismatch",
            Self::OptionalityMismatch => "optionality_mismatch",
            Self::NullabilityMismatch => "nullability_mismatch",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingInBackend | Self::TypeMismatch => Severity::Error,
            Self::MissingInFrontend | Self::OptionalityMismatch | Self::NullabilityMismatch => {
                Severity::Warning
            }
        }
    }

    pub fn all() -> &'static [MismatchKind] {
        &[
            Self::MissingInFrontend,
            Self::MissingInBackend,
            Self::TypeMismatch,
            Self::OptionalityMismatch,
            Self::NullabilityMismatch,
        ]
    }
}

impl std::fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mismatch severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single divergence between backend and frontend schemas at one field path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub id: MismatchId,
    /// Root-prefixed path, e.g. `$.user.email` or `$.items[]`.
    pub field_path: String,
    pub kind: MismatchKind,
    pub severity: Severity,
    pub description: String,
    pub backend_type: String,
    pub frontend_type: String,
}

impl FieldMismatch {
    /// Build a mismatch with a fresh id; severity follows from `kind`.
    pub fn new(
        kind: MismatchKind,
        field_path: impl Into<String>,
        description: impl Into<String>,
        backend_type: impl Into<String>,
        frontend_type: impl Into<String>,
    ) -> Self {
        Self {
            id: MismatchId::generate(),
            field_path: field_path.into(),
            kind,
            severity: kind.severity(),
            description: description.into(),
            backend_type: backend_type.into(),
            frontend_type: frontend_type.into(),
        }
    }
}
