//! CLI argument definitions using clap
//!
//! Commands:
//! - fielddata validate --schema <path>
//! - fielddata get --schema <path> --field <name>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fielddata - decode and validate untyped JSON records against a field schema
#[derive(Parser, Debug)]
#[command(name = "fielddata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a record read from stdin
    Validate {
        /// Path to schema file
        #[arg(long, default_value = "./schema.json")]
        schema: PathBuf,
    },

    /// Validate a record read from stdin, then print one decoded field
    Get {
        /// Path to schema file
        #[arg(long, default_value = "./schema.json")]
        schema: PathBuf,

        /// Field to decode
        #[arg(long)]
        field: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
