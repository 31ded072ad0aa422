//! Top-level error aggregating subsystem errors.

use super::error_code::AccordErrorCode;
use super::{ConfigError, PatternError, SchemaError};

/// Any error surfaced by Accord's fallible entry points.
#[derive(Debug, thiserror::Error)]
pub enum AccordError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AccordErrorCode for AccordError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            Self::Pattern(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
