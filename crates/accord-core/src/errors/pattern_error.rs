//! Path pattern errors.

use super::error_code::{self, AccordErrorCode};

/// Errors that can occur while compiling route templates or ignore globs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("Route template {path} did not compile: {message}")]
    InvalidRegex { path: String, message: String },

    #[error("Invalid glob pattern {pattern}: {message}")]
    InvalidGlob { pattern: String, message: String },
}

impl AccordErrorCode for PatternError {
    fn error_code(&self) -> &'static str {
        error_code::PATTERN_ERROR
    }
}
