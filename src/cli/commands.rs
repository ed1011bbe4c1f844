//! CLI command implementations

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::cpf::{self, Cpf};
use crate::http_server::HttpServer;
use crate::observability::{self, Event};
use crate::registry::CustomerRegistry;
use crate::store::{CustomerStore, FlatFileStore, ParseMode};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Installs logging, parses arguments and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    observability::init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Check { config } => check(&config),
        Command::Validate { cpf } => validate(&cpf),
    }
}

/// Create the data file named by the configuration, if absent
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let existed = config.data_file.exists();
    let store = open_store(&config, config.parse_mode)?;

    if existed {
        println!("Data file {} already exists", store.path().display());
    } else {
        println!("Initialized data file {}", store.path().display());
    }
    Ok(())
}

/// Serve the HTTP API until Ctrl-C
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    info!(event = %Event::BootStart, "starting cadastro");

    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let store = open_store(&config, config.parse_mode)?;
    let registry = Arc::new(CustomerRegistry::new(store));
    let server = HttpServer::new(
        config.server.socket_addr(),
        &config.server.cors_origins,
        registry,
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Findings of a data file integrity check
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Records that decoded
    pub records: usize,
    /// Stored CPFs that fail validation
    pub invalid_cpfs: Vec<String>,
    /// CPFs stored more than once (normalized)
    pub duplicate_cpfs: Vec<String>,
}

impl CheckReport {
    /// Duplicates break the key invariant; invalid CPFs only make the
    /// record unreachable through the API.
    pub fn is_ok(&self) -> bool {
        self.duplicate_cpfs.is_empty()
    }
}

/// Strictly parse the data file and collect key problems
///
/// Fails on the first malformed line.
pub fn inspect(config: &Config) -> CliResult<CheckReport> {
    if !config.data_file.exists() {
        return Err(CliError::not_initialized(&config.data_file));
    }

    let store = open_store(config, ParseMode::Strict)?;
    let customers = store.load_all()?;

    let mut report = CheckReport {
        records: customers.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for customer in &customers {
        if !cpf::is_valid(&customer.cpf) {
            report.invalid_cpfs.push(customer.cpf.clone());
        }
        let key = cpf::normalize(&customer.cpf);
        if !seen.insert(key.clone()) && !report.duplicate_cpfs.contains(&key) {
            report.duplicate_cpfs.push(key);
        }
    }

    Ok(report)
}

/// `check` command: print the report, fail if the file is unusable
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let report = inspect(&config)?;

    println!(
        "{}: {} record(s)",
        config.data_file.display(),
        report.records
    );
    for cpf in &report.invalid_cpfs {
        println!("  invalid CPF: {}", cpf);
    }
    for cpf in &report.duplicate_cpfs {
        println!("  duplicate CPF: {}", cpf);
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(CliError::check_failed(format!(
            "{} duplicate CPF(s) in {}",
            report.duplicate_cpfs.len(),
            config.data_file.display()
        )))
    }
}

/// `validate` command
pub fn validate(input: &str) -> CliResult<()> {
    match Cpf::parse(input) {
        Some(cpf) => {
            println!("{} valid", cpf.formatted());
            Ok(())
        }
        None => {
            println!("{} invalid", input);
            Err(CliError::invalid_cpf(input))
        }
    }
}

fn open_store(config: &Config, mode: ParseMode) -> CliResult<FlatFileStore> {
    let store = FlatFileStore::open(&config.data_file, mode)?;
    info!(
        event = %Event::StoreOpened,
        path = %store.path().display(),
        mode = ?store.mode(),
        "data file opened"
    );
    Ok(store)
}
