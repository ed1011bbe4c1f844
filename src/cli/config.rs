//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "data_file": "clientes.txt",
//!   "parse_mode": "lenient",
//!   "server": { "host": "0.0.0.0", "port": 5000, "cors_origins": [] }
//! }
//! ```
//!
//! A missing file is not an error: the defaults above apply.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::{CliError, CliResult};
use crate::observability::Event;
use crate::store::ParseMode;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data file, relative to the working directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// How malformed lines are handled on load
    #[serde(default)]
    pub parse_mode: ParseMode,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listener settings for `serve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins. Empty allows any.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("clientes.txt")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            parse_mode: ParseMode::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if absent
    pub fn load(path: &Path) -> CliResult<Self> {
        let config = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        config.validate()?;

        info!(
            event = %Event::ConfigLoaded,
            config = %path.display(),
            data_file = %config.data_file.display(),
            parse_mode = ?config.parse_mode,
            "configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }
        if self.server.host.is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, PathBuf::from("clientes.txt"));
        assert_eq!(config.parse_mode, ParseMode::Lenient);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadastro.json");
        fs::write(
            &path,
            json!({"parse_mode": "strict", "server": {"port": 8088}}).to_string(),
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.parse_mode, ParseMode::Strict);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data_file, PathBuf::from("clientes.txt"));
    }

    #[test]
    fn test_server_socket_addr() {
        let server = ServerConfig {
            port: 8080,
            ..Default::default()
        };
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
        assert!(server.cors_origins.is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadastro.json");
        fs::write(&path, "{ nope").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_unknown_parse_mode_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadastro.json");
        fs::write(&path, json!({"parse_mode": "whatever"}).to_string()).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_empty_data_file_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadastro.json");
        fs::write(&path, json!({"data_file": ""}).to_string()).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
