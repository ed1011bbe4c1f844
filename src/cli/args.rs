//! CLI argument definitions using clap
//!
//! Commands:
//! - cadastro init --config <path>
//! - cadastro serve --config <path> [--port <port>]
//! - cadastro check --config <path>
//! - cadastro validate <cpf>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "./cadastro.json";

/// cadastro - flat-file customer registry
#[derive(Parser, Debug)]
#[command(name = "cadastro")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data file if it does not exist
    Init {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Strictly parse the data file and report problems
    Check {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Check whether a CPF is valid
    Validate {
        /// CPF, with or without punctuation
        cpf: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
