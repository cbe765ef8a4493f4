//! Schema-directed access to raw request fields
//!
//! Accessor tiers:
//! - `get_ok_err`: never panics, reports every failure as `DecodeError`
//! - `get_ok`: panics on decode errors, reports presence
//! - `get` / `get_default_or_zero`: panic on fields missing from the schema
//!
//! Callers run `validate` once over untrusted input before using the
//! panicking tiers. Skipping validation turns bad input into a panic, never
//! into a silently wrong value.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::schema::{
    CoercionError, DecodeError, DecodeResult, FieldSchema, FieldType, FieldValue, SchemaMap,
};

use super::duration::parse_duration_seconds;
use super::normalize::trim_strings;
use super::weak;

/// Raw, untyped input record.
pub type RawRecord = Map<String, Value>;

/// Word characters at both ends, word characters, `-` and `.` inside.
static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();

fn name_pattern() -> &'static Regex {
    NAME_PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9A-Za-z_]([0-9A-Za-z_.-]*[0-9A-Za-z_])?$").expect("name pattern compiles")
    })
}

/// Typed view over one raw record, directed by a schema.
///
/// Holds shared borrows only; the record and schema are never modified.
#[derive(Debug, Clone, Copy)]
pub struct FieldData<'a> {
    raw: &'a RawRecord,
    schema: &'a SchemaMap,
}

impl<'a> FieldData<'a> {
    /// Pairs a raw record with the schema that describes it.
    pub fn new(raw: &'a RawRecord, schema: &'a SchemaMap) -> Self {
        Self { raw, schema }
    }

    /// Returns the raw record.
    pub fn raw(&self) -> &'a RawRecord {
        self.raw
    }

    /// Returns the schema.
    pub fn schema(&self) -> &'a SchemaMap {
        self.schema
    }

    /// Checks that every field present in both the record and the schema
    /// decodes cleanly.
    ///
    /// Fields missing from the schema are ignored. Fields missing from the
    /// record are not checked.
    ///
    /// # Errors
    ///
    /// Returns the first failure in record key order:
    /// - `UnknownType` if the schema declares an unrecognized type
    /// - `Coercion` if the raw value cannot become the declared type
    pub fn validate(&self) -> DecodeResult<()> {
        for (field, value) in self.raw {
            let Some(schema) = self.schema.get(field) else {
                trace!(field = %field, "ignoring field not in schema");
                continue;
            };

            let checked = resolve_type(field, schema).and_then(|field_type| {
                coerce(field_type, value)
                    .map(|_| ())
                    .map_err(|source| coercion_error(field, value, source))
            });

            if let Err(err) = checked {
                debug!(field = %field, code = err.code(), error = %err, "validation rejected field");
                return Err(err);
            }
        }

        Ok(())
    }

    /// Returns the value of `key`, its default, or the zero value of its
    /// type.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the schema, or if the raw value does not
    /// decode (run [`FieldData::validate`] first).
    pub fn get(&self, key: &str) -> FieldValue {
        let schema = self.expect_schema(key);

        match self.get_ok(key) {
            (Some(value), true) => value,
            _ => default_or_zero(key, schema),
        }
    }

    /// Returns the schema default for `key`, or the zero value of its type.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not in the schema or declares an unrecognized type.
    pub fn get_default_or_zero(&self, key: &str) -> FieldValue {
        default_or_zero(key, self.expect_schema(key))
    }

    /// Returns the value of `key` and whether it was present in the record.
    ///
    /// An absent field yields its default-or-zero with `false`. A present
    /// field that decodes to nothing (JSON `null`) yields its default-or-zero
    /// with `true`. A key unknown to the schema yields `(None, false)`.
    ///
    /// # Panics
    ///
    /// Panics if the field fails to decode (run [`FieldData::validate`]
    /// first).
    pub fn get_ok(&self, key: &str) -> (Option<FieldValue>, bool) {
        let Some(schema) = self.schema.get(key) else {
            return (None, false);
        };

        let (value, present) = match self.get_ok_err(key) {
            Ok(result) => result,
            Err(e) => panic!("error reading {}: {}", key, e),
        };

        let value = value.unwrap_or_else(|| default_or_zero(key, schema));
        (Some(value), present)
    }

    /// Decodes `key`, reporting every failure as an error.
    ///
    /// Returns `(None, false)` if the key is absent from the record, and
    /// `(None, true)` if it is present but decodes to nothing.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if `key` is not in the schema
    /// - `UnknownType` if the schema declares an unrecognized type
    /// - `Coercion` if the raw value cannot become the declared type
    pub fn get_ok_err(&self, key: &str) -> DecodeResult<(Option<FieldValue>, bool)> {
        let schema = self.schema.get(key).ok_or_else(|| DecodeError::UnknownField {
            field: key.to_string(),
        })?;
        let field_type = resolve_type(key, schema)?;

        let Some(raw) = self.raw.get(key) else {
            return Ok((None, false));
        };

        // A null duration is treated as unset
        if field_type == FieldType::DurationSecond && raw.is_null() {
            return Ok((None, false));
        }

        let value = coerce(field_type, raw).map_err(|source| coercion_error(key, raw, source))?;
        Ok((value, true))
    }

    fn expect_schema(&self, key: &str) -> &'a FieldSchema {
        match self.schema.get(key) {
            Some(schema) => schema,
            None => panic!("field {} not in the schema", key),
        }
    }
}

/// Resolves the default for a schema entry, coercing it through the field's
/// own rules. A default that does not coerce falls back to the zero value.
///
/// # Panics
///
/// Panics if the schema entry declares an unrecognized type.
fn default_or_zero(field: &str, schema: &FieldSchema) -> FieldValue {
    let field_type = match resolve_type(field, schema) {
        Ok(field_type) => field_type,
        Err(e) => panic!("{}", e),
    };

    let Some(default) = schema.default.as_ref() else {
        return field_type.zero();
    };

    match coerce(field_type, default) {
        Ok(Some(value)) => value,
        Ok(None) => field_type.zero(),
        Err(e) => {
            warn!(field = %field, error = %e, "schema default does not decode, using zero value");
            field_type.zero()
        }
    }
}

fn resolve_type(field: &str, schema: &FieldSchema) -> DecodeResult<FieldType> {
    schema
        .field_type
        .known()
        .ok_or_else(|| DecodeError::UnknownType {
            field: field.to_string(),
            type_name: schema.field_type.name().to_string(),
        })
}

/// Coerces a raw value into `field_type`. `Ok(None)` means the raw value
/// was `null`.
fn coerce(field_type: FieldType, raw: &Value) -> Result<Option<FieldValue>, CoercionError> {
    let value = match field_type {
        FieldType::Bool => weak::to_bool(raw)?.map(FieldValue::Bool),
        FieldType::Int => weak::to_int(raw)?.map(FieldValue::Int),
        FieldType::String => weak::to_string(raw)?.map(FieldValue::String),
        FieldType::NameString => match weak::to_string(raw)? {
            Some(name) if name_pattern().is_match(&name) => Some(FieldValue::String(name)),
            Some(_) => return Err(CoercionError::NameFormat),
            None => None,
        },
        FieldType::Map => weak::to_map(raw)?.map(FieldValue::Map),
        FieldType::DurationSecond => duration_seconds(raw)?.map(FieldValue::Int),
        FieldType::Slice => weak::to_slice(raw)?.map(FieldValue::Slice),
        FieldType::StringSlice => weak::to_string_slice(raw)?
            .map(trim_strings)
            .map(FieldValue::StringSlice),
        FieldType::CommaStringSlice => weak::to_comma_string_slice(raw)?
            .map(trim_strings)
            .map(FieldValue::StringSlice),
    };

    Ok(value)
}

fn duration_seconds(raw: &Value) -> Result<Option<i64>, CoercionError> {
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => weak::number_to_int(n).map(Some),
        Value::String(s) => Ok(Some(parse_duration_seconds(s)?)),
        other => Err(CoercionError::TypeMismatch {
            expected: "duration-second",
            actual: weak::json_type_name(other),
        }),
    }
}

fn coercion_error(field: &str, raw: &Value, source: CoercionError) -> DecodeError {
    DecodeError::Coercion {
        field: field.to_string(),
        input: raw.to_string(),
        source,
    }
}
