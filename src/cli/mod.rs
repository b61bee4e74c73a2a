//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Boot from config/seed and serve HTTP
//! - check: Validate seed data and exit
//! - schema: Print the effective schema

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, SourceArgs};
pub use commands::{boot, check, print_schema, resolve_schema, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
