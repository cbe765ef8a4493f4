//! Decode error types
//!
//! Error codes:
//! - FIELD_UNKNOWN_FIELD (key not declared in the schema)
//! - FIELD_UNKNOWN_TYPE (schema declares an unrecognized type)
//! - FIELD_COERCION_FAILED (raw value cannot become the declared type)

use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors returned by `FieldData::validate` and `FieldData::get_ok_err`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Key has no schema entry
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    /// Schema entry declares a type outside the recognized set
    #[error("unknown field type {type_name} for field {field}")]
    UnknownType { field: String, type_name: String },

    /// Raw value could not be coerced into the declared type
    #[error("error converting input {input} for field {field}: {source}")]
    Coercion {
        field: String,
        input: String,
        #[source]
        source: CoercionError,
    },
}

impl DecodeError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::UnknownField { .. } => "FIELD_UNKNOWN_FIELD",
            DecodeError::UnknownType { .. } => "FIELD_UNKNOWN_TYPE",
            DecodeError::Coercion { .. } => "FIELD_COERCION_FAILED",
        }
    }

    /// Returns the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            DecodeError::UnknownField { field }
            | DecodeError::UnknownType { field, .. }
            | DecodeError::Coercion { field, .. } => field,
        }
    }

    /// Returns the underlying coercion error, if any
    pub fn coercion(&self) -> Option<&CoercionError> {
        match self {
            DecodeError::Coercion { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to convert one raw value into a target representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("expected type '{expected}', got unconvertible type '{actual}'")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot parse '{0}' as bool")]
    InvalidBool(String),

    #[error("cannot parse '{0}' as int")]
    InvalidInt(String),

    #[error("value {0} overflows int")]
    IntOverflow(String),

    #[error("field does not match the formatting rules")]
    NameFormat,

    #[error("element [{index}]: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<CoercionError>,
    },

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Failure to parse a duration string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration '{input}': {reason}")]
    Invalid { input: String, reason: String },

    #[error("duration '{0}' overflows int")]
    Overflow(String),
}
