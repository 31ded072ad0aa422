//! Schema construction errors.

use super::error_code::{self, AccordErrorCode};

/// Errors raised when a type schema violates its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Required property '{property}' has no matching entry in properties")]
    UnknownRequiredProperty { property: String },

    #[error("Schema of kind '{kind}' cannot carry properties")]
    PropertiesOnNonObject { kind: String },

    #[error("Schema of kind '{kind}' cannot carry an item schema")]
    ItemsOnNonArray { kind: String },

    #[error("Invalid schema JSON: {message}")]
    Json { message: String },
}

impl AccordErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
