//! Field schema model
//!
//! A schema maps field names to a declared type and an optional default.
//! Schemas are built once (by hand or from a JSON schema file) and shared
//! read-only by every decoder created for a request.

mod errors;
mod loader;
mod types;

pub use errors::{CoercionError, DecodeError, DecodeResult, DurationError};
pub use loader::{SchemaFile, SchemaLoadError};
pub use types::{DeclaredType, FieldSchema, FieldType, FieldValue, SchemaMap};
