//! JSON I/O handling for CLI
//!
//! - Input: single JSON object via stdin
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};
use crate::decode::RawRecord;

/// Read one JSON record from stdin
pub fn read_request() -> CliResult<RawRecord> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_record(&input)
}

/// Parse a JSON record; the top level must be an object
pub fn parse_record(input: &str) -> CliResult<RawRecord> {
    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    match serde_json::from_str::<Value>(input)? {
        Value::Object(record) => Ok(record),
        _ => Err(CliError::io_error("Input must be a JSON object")),
    }
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
