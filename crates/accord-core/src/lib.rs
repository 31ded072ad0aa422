//! # accord-core
//!
//! Shared foundation for the Accord contract engine: errors, layered
//! configuration, tracing setup, identifier types, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::AccordConfig;
pub use errors::{AccordError, AccordErrorCode};
