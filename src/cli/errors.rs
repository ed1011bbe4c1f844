//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error
    IoError,
    /// Data file missing
    NotInitialized,
    /// Data file failed the integrity check
    CheckFailed,
    /// CPF argument is not valid
    InvalidCpf,
    /// Server could not start or crashed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CADASTRO_CLI_CONFIG_ERROR",
            Self::IoError => "CADASTRO_CLI_IO_ERROR",
            Self::NotInitialized => "CADASTRO_CLI_NOT_INITIALIZED",
            Self::CheckFailed => "CADASTRO_CLI_CHECK_FAILED",
            Self::InvalidCpf => "CADASTRO_CLI_INVALID_CPF",
            Self::BootFailed => "CADASTRO_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Not initialized
    pub fn not_initialized(path: &std::path::Path) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "Data file {} does not exist. Run 'cadastro init' first.",
                path.display()
            ),
        )
    }

    /// Integrity check failed
    pub fn check_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::CheckFailed, msg)
    }

    /// Invalid CPF argument
    pub fn invalid_cpf(cpf: &str) -> Self {
        Self::new(CliErrorCode::InvalidCpf, format!("'{}' is not a valid CPF", cpf))
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        // Only a bad record carries a line number.
        match e.line() {
            Some(_) => Self::check_failed(e.to_string()),
            None => Self::io_error(e.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
