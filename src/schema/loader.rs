//! Schema file loading
//!
//! A schema file is a single JSON object keyed by field name:
//!
//! ```json
//! {
//!   "ttl":   { "type": "duration-second", "default": "1h" },
//!   "hosts": { "type": "comma-string-slice", "description": "Allowed hosts" }
//! }
//! ```
//!
//! Unrecognized type names load successfully. They are reported when a
//! decoder touches the field, not here.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use super::types::{FieldSchema, SchemaMap};

/// Schema file load errors
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("failed to read schema file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("failed to write schema file '{path}': {reason}")]
    Write { path: String, reason: String },
}

/// A schema map loaded from (or destined for) a JSON file.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    path: PathBuf,
    fields: SchemaMap,
}

impl SchemaFile {
    /// Reads and parses a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaLoadError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let fields = Self::parse(&content).map_err(|reason| SchemaLoadError::Malformed {
            path: path.display().to_string(),
            reason,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    /// Parses schema JSON into a schema map.
    pub fn parse(content: &str) -> Result<SchemaMap, String> {
        let fields: SchemaMap =
            serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {}", e))?;

        if fields.keys().any(|name| name.is_empty()) {
            return Err("field names must not be empty".into());
        }

        for (name, entry) in &fields {
            if entry.field_type.known().is_none() {
                warn!(field = %name, type_name = %entry.field_type, "schema declares unrecognized field type");
            }
        }

        Ok(fields)
    }

    /// Writes a schema map to `path` as pretty-printed JSON.
    pub fn save(path: &Path, fields: &SchemaMap) -> Result<(), SchemaLoadError> {
        let content =
            serde_json::to_string_pretty(fields).map_err(|e| SchemaLoadError::Malformed {
                path: path.display().to_string(),
                reason: format!("Failed to serialize schema: {}", e),
            })?;

        fs::write(path, content).map_err(|e| SchemaLoadError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the file this schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the loaded schema map.
    pub fn fields(&self) -> &SchemaMap {
        &self.fields
    }

    /// Returns the entry for one field.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Consumes the file, returning the schema map.
    pub fn into_fields(self) -> SchemaMap {
        self.fields
    }
}
