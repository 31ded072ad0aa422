//! Configuration errors.

use super::error_code::{self, AccordErrorCode};

/// Failures while reading, parsing, or checking an Accord config layer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {path} is not valid TOML: {message}")]
    Parse { path: String, message: String },

    #[error("Cannot render config as TOML: {message}")]
    Serialize { message: String },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("{field} entry {pattern:?} is not a valid glob: {message}")]
    InvalidGlob {
        field: &'static str,
        pattern: String,
        message: String,
    },
}

impl ConfigError {
    /// Dotted config key the error is about, when it concerns one value.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { field, .. }
            | Self::Blank { field }
            | Self::InvalidGlob { field, .. } => Some(*field),
            Self::Unreadable { .. } | Self::Parse { .. } | Self::Serialize { .. } => None,
        }
    }
}

impl AccordErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
