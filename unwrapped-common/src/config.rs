//! Configuration loading and resolution
//!
//! Each setting is resolved independently, highest priority first:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_DATA_DIR: &str = "UNWRAPPED_DATA_DIR";
pub const ENV_HOST: &str = "UNWRAPPED_HOST";
pub const ENV_PORT: &str = "UNWRAPPED_PORT";
pub const ENV_LOG_LEVEL: &str = "UNWRAPPED_LOG_LEVEL";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Values used when nothing else provides a setting
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("public"),
            host: "127.0.0.1".to_string(),
            port: 5173,
            log_level: "info".to_string(),
        }
    }
}

/// Settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding `collection_<year>.json` files
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// `host:port` for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolves [`ServiceConfig`] from CLI, environment, TOML and defaults
pub struct ConfigResolver {
    overrides: CliOverrides,
    defaults: CompiledDefaults,
}

impl ConfigResolver {
    pub fn new(overrides: CliOverrides) -> Self {
        Self {
            overrides,
            defaults: CompiledDefaults::default(),
        }
    }

    pub fn resolve(&self) -> Result<ServiceConfig> {
        let file_config = self.load_toml()?;
        let cli = &self.overrides;

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| env_var(ENV_DATA_DIR).map(PathBuf::from))
            .or(file_config.data_dir)
            .unwrap_or_else(|| self.defaults.data_dir.clone());

        let host = cli
            .host
            .clone()
            .or_else(|| env_var(ENV_HOST))
            .or(file_config.host)
            .unwrap_or_else(|| self.defaults.host.clone());

        let port = match cli.port {
            Some(port) => port,
            None => match env_var(ENV_PORT) {
                Some(raw) => raw.parse::<u16>().map_err(|e| {
                    Error::Config(format!("Invalid {} value {:?}: {}", ENV_PORT, raw, e))
                })?,
                None => file_config.port.unwrap_or(self.defaults.port),
            },
        };

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| env_var(ENV_LOG_LEVEL))
            .or(file_config.log_level)
            .unwrap_or_else(|| self.defaults.log_level.clone());

        Ok(ServiceConfig {
            data_dir,
            host,
            port,
            log_level,
        })
    }

    /// Explicit config file must exist; the default location is optional
    fn load_toml(&self) -> Result<TomlConfig> {
        if let Some(path) = &self.overrides.config_file {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return load_toml_config(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => load_toml_config(&path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(TomlConfig::default())
            }
            None => {
                debug!("Could not determine config directory, using defaults");
                Ok(TomlConfig::default())
            }
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&contents)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(config)
}

/// `<user config dir>/unwrapped/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("unwrapped").join("config.toml"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::default();
        assert_eq!(defaults.data_dir, PathBuf::from("public"));
        assert_eq!(defaults.host, "127.0.0.1");
        assert_eq!(defaults.port, 5173);
        assert_eq!(defaults.log_level, "info");
    }

    #[test]
    fn test_bind_addr() {
        let config = ServiceConfig {
            data_dir: PathBuf::from("public"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "debug".to_string(),
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_toml_partial_keys() {
        let config: TomlConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.port, Some(9000));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_default_config_path_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("unwrapped/config.toml"));
        }
    }
}
