//! AccordErrorCode trait for structured error reporting.

/// Trait for converting Accord errors to stable error code strings.
/// Every error enum implements this so consumers (store, editor layer)
/// can branch on a code instead of parsing messages.
pub trait AccordErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const PATTERN_ERROR: &str = "PATTERN_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
