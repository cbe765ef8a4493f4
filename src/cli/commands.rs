//! CLI command implementations
//!
//! Each command loads the schema file, reads one record from stdin and
//! writes one JSON response to stdout.

use std::path::Path;

use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::decode::{FieldData, RawRecord};
use crate::schema::{DecodeError, SchemaFile, SchemaMap};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { schema } => validate(&schema),
        Command::Get { schema, field } => get(&schema, &field),
    }
}

/// Validate a record from stdin against the schema file
pub fn validate(schema_path: &Path) -> CliResult<()> {
    let schema = load_schema(schema_path)?;
    let record = read_request()?;

    let data = respond(validate_record(&record, &schema))?;
    write_response(data)
}

/// Validate a record from stdin, then print one decoded field
pub fn get(schema_path: &Path, field: &str) -> CliResult<()> {
    let schema = load_schema(schema_path)?;
    let record = read_request()?;

    let data = respond(get_field(&record, &schema, field))?;
    write_response(data)
}

/// Validates `record`, returning the response payload.
pub fn validate_record(record: &RawRecord, schema: &SchemaMap) -> Result<Value, DecodeError> {
    FieldData::new(record, schema).validate()?;
    Ok(json!({ "valid": true }))
}

/// Validates `record` and decodes `field`, returning the response payload.
///
/// An absent field is reported with its default-or-zero value.
pub fn get_field(
    record: &RawRecord,
    schema: &SchemaMap,
    field: &str,
) -> Result<Value, DecodeError> {
    let data = FieldData::new(record, schema);
    data.validate()?;

    let (value, present) = data.get_ok_err(field)?;
    let value = value.unwrap_or_else(|| data.get_default_or_zero(field));

    Ok(json!({
        "field": field,
        "present": present,
        "value": value.into_json(),
    }))
}

fn load_schema(path: &Path) -> CliResult<SchemaMap> {
    let file = SchemaFile::load(path)?;
    info!(path = %path.display(), fields = file.fields().len(), "schema loaded");
    Ok(file.into_fields())
}

/// Writes the error response for a rejected record before propagating it.
fn respond(result: Result<Value, DecodeError>) -> CliResult<Value> {
    result.or_else(|e| {
        write_error(e.code(), &e.to_string())?;
        Err(CliError::from(e))
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType};

    fn schema() -> SchemaMap {
        let mut fields = SchemaMap::new();
        fields.insert(
            "ttl".into(),
            FieldSchema::new(FieldType::DurationSecond).with_default("30s"),
        );
        fields.insert("hosts".into(), FieldSchema::new(FieldType::CommaStringSlice));
        fields
    }

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("record must be an object"),
        }
    }

    #[test]
    fn test_validate_record_ok() {
        let raw = record(json!({ "ttl": "5m", "other": [] }));
        assert_eq!(validate_record(&raw, &schema()), Ok(json!({ "valid": true })));
    }

    #[test]
    fn test_get_field_present() {
        let raw = record(json!({ "hosts": "a , b" }));
        assert_eq!(
            get_field(&raw, &schema(), "hosts"),
            Ok(json!({ "field": "hosts", "present": true, "value": ["a", "b"] }))
        );
    }

    #[test]
    fn test_get_field_absent_uses_default() {
        let raw = record(json!({}));
        assert_eq!(
            get_field(&raw, &schema(), "ttl"),
            Ok(json!({ "field": "ttl", "present": false, "value": 30 }))
        );
    }

    #[test]
    fn test_get_field_unknown() {
        let raw = record(json!({}));
        let err = get_field(&raw, &schema(), "nope").unwrap_err();
        assert_eq!(err.code(), "FIELD_UNKNOWN_FIELD");
    }

    #[test]
    fn test_get_field_rejects_invalid_record() {
        let raw = record(json!({ "ttl": "soon" }));
        let err = get_field(&raw, &schema(), "hosts").unwrap_err();
        assert_eq!(err.field(), "ttl");
    }
}
