//! CLI module for cadastro
//!
//! Provides command-line interface for:
//! - init: Create the data file
//! - serve: Run the HTTP API
//! - check: Strict integrity check of the data file
//! - validate: One-shot CPF validation

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, DEFAULT_CONFIG_PATH};
pub use commands::{check, init, inspect, run, run_command, serve, validate, CheckReport};
pub use config::{Config, ServerConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
