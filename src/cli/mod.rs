//! CLI module for fielddata
//!
//! Provides command-line interface for:
//! - validate: Check a record against a schema file
//! - get: Decode a single field of a record

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{get, get_field, run, run_command, validate, validate_record};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_record, read_request, write_error, write_response};
