//! Schema type definitions
//!
//! Recognized field types (closed set):
//! - bool, int, map, duration-second
//! - string, name-string
//! - slice, string-slice, comma-string-slice
//!
//! A schema may still *declare* any type name. Unrecognized names are kept
//! verbatim in [`DeclaredType::Unknown`] and fail wherever the field is used.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Mapping from field name to its schema entry.
pub type SchemaMap = HashMap<String, FieldSchema>;

/// Recognized field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Boolean
    Bool,
    /// Signed integer
    Int,
    /// Map of string to arbitrary value
    Map,
    /// Whole-second duration, accepted as a number or duration string
    DurationSecond,
    /// UTF-8 string
    String,
    /// String restricted to word characters, '-' and '.'
    NameString,
    /// Ordered sequence of arbitrary values
    Slice,
    /// Ordered sequence of trimmed strings
    StringSlice,
    /// Like `StringSlice`, but a single string is split on commas
    CommaStringSlice,
}

impl FieldType {
    /// Every recognized type, in declaration order.
    pub const ALL: [FieldType; 9] = [
        FieldType::Bool,
        FieldType::Int,
        FieldType::Map,
        FieldType::DurationSecond,
        FieldType::String,
        FieldType::NameString,
        FieldType::Slice,
        FieldType::StringSlice,
        FieldType::CommaStringSlice,
    ];

    /// Returns the type name as written in schemas.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Map => "map",
            FieldType::DurationSecond => "duration-second",
            FieldType::String => "string",
            FieldType::NameString => "name-string",
            FieldType::Slice => "slice",
            FieldType::StringSlice => "string-slice",
            FieldType::CommaStringSlice => "comma-string-slice",
        }
    }

    /// Returns the zero value of this type.
    pub fn zero(&self) -> FieldValue {
        match self {
            FieldType::Bool => FieldValue::Bool(false),
            FieldType::Int | FieldType::DurationSecond => FieldValue::Int(0),
            FieldType::String | FieldType::NameString => FieldValue::String(String::new()),
            FieldType::Map => FieldValue::Map(Map::new()),
            FieldType::Slice => FieldValue::Slice(Vec::new()),
            FieldType::StringSlice | FieldType::CommaStringSlice => {
                FieldValue::StringSlice(Vec::new())
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.type_name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The type tag a schema entry declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredType {
    Known(FieldType),
    Unknown(String),
}

impl DeclaredType {
    /// Returns the recognized type, if any.
    pub fn known(&self) -> Option<FieldType> {
        match self {
            DeclaredType::Known(t) => Some(*t),
            DeclaredType::Unknown(_) => None,
        }
    }

    /// Returns the type name exactly as declared.
    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Known(t) => t.type_name(),
            DeclaredType::Unknown(name) => name,
        }
    }
}

impl From<FieldType> for DeclaredType {
    fn from(t: FieldType) -> Self {
        DeclaredType::Known(t)
    }
}

impl From<String> for DeclaredType {
    fn from(name: String) -> Self {
        match name.parse::<FieldType>() {
            Ok(t) => DeclaredType::Known(t),
            Err(name) => DeclaredType::Unknown(name),
        }
    }
}

impl From<DeclaredType> for String {
    fn from(t: DeclaredType) -> Self {
        match t {
            DeclaredType::Known(t) => t.type_name().to_string(),
            DeclaredType::Unknown(name) => name,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema entry for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Declared field type
    #[serde(rename = "type")]
    pub field_type: DeclaredType,
    /// Value used when the field is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human-readable description (no decoding semantics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    /// Create a schema entry of the given type with no default.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type: field_type.into(),
            default: None,
            description: None,
        }
    }

    /// Create a schema entry declaring an arbitrary type name.
    pub fn declared(type_name: impl Into<String>) -> Self {
        Self {
            field_type: DeclaredType::from(type_name.into()),
            default: None,
            description: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A successfully decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    /// `int` and `duration-second` fields
    Int(i64),
    /// `string` and `name-string` fields
    String(String),
    Map(Map<String, Value>),
    Slice(Vec<Value>),
    /// `string-slice` and `comma-string-slice` fields
    StringSlice(Vec<String>),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            FieldValue::Slice(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string_slice(&self) -> Option<&[String]> {
        match self {
            FieldValue::StringSlice(v) => Some(v),
            _ => None,
        }
    }

    /// Converts the value back into a JSON value.
    pub fn into_json(self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Int(i) => Value::from(i),
            FieldValue::String(s) => Value::String(s),
            FieldValue::Map(m) => Value::Object(m),
            FieldValue::Slice(v) => Value::Array(v),
            FieldValue::StringSlice(v) => Value::Array(v.into_iter().map(Value::String).collect()),
        }
    }
}
