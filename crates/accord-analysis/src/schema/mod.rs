//! Schema model: recursive type descriptions and their structural comparison.

pub mod compare;
pub mod mismatch;
pub mod types;

pub use compare::compare;
pub use mismatch::{FieldMismatch, MismatchKind, Severity};
pub use types::{ObjectBuilder, SchemaKind, TypeSchema};
