//! Error handling for Accord.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod accord_error;
pub mod config_error;
pub mod error_code;
pub mod pattern_error;
pub mod schema_error;

pub use accord_error::AccordError;
pub use config_error::ConfigError;
pub use error_code::AccordErrorCode;
pub use pattern_error::PatternError;
pub use schema_error::SchemaError;
