//! Configuration loading and base URL resolution
//!
//! The client needs one setting, the remote service base URL. It is resolved
//! in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SONGLIB_API_BASE_URL`, then `API_BASE_URL`)
//! 3. TOML config file (`api_base_url`)
//! 4. Compiled default (`http://localhost:3000/api`)
//!
//! A missing or malformed config file never stops startup; a warning is
//! logged and the remaining sources are consulted.

use crate::{pagination::DEFAULT_PAGE_SIZE, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Local development address of the mock backend
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Primary environment variable for the base URL
pub const ENV_API_BASE_URL: &str = "SONGLIB_API_BASE_URL";

/// Fallback environment variable, kept for setups that already export it
pub const ENV_API_BASE_URL_FALLBACK: &str = "API_BASE_URL";

/// Transport timeout applied to every request when not configured
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset (`error`..`trace`)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// On-disk TOML configuration; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
    pub page_size: Option<u32>,
}

/// Resolves [`ClientConfig`] from CLI, environment, TOML and defaults
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_path: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver that reads the platform config file (`<config dir>/songlib/config.toml`)
    pub fn new() -> Self {
        Self {
            config_path: default_config_path(),
        }
    }

    /// Resolver that reads an explicit config file instead
    pub fn with_config_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Config file this resolver consults, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Resolve the client configuration
    pub fn resolve(&self, cli: &CliOverrides) -> ClientConfig {
        let toml_config = self.load_toml_or_default();

        let api_base_url = cli
            .api_base_url
            .clone()
            .or_else(|| env_non_empty(ENV_API_BASE_URL))
            .or_else(|| env_non_empty(ENV_API_BASE_URL_FALLBACK))
            .or_else(|| toml_config.api_base_url.clone().filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let page_size = cli
            .page_size
            .or(toml_config.page_size)
            .filter(|size| *size >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let request_timeout = Duration::from_secs(
            toml_config
                .request_timeout_secs
                .filter(|secs| *secs >= 1)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        ClientConfig {
            api_base_url: normalize_base_url(&api_base_url),
            page_size,
            request_timeout,
            log_level: toml_config.logging.level,
        }
    }

    fn load_toml_or_default(&self) -> TomlConfig {
        let Some(path) = self.config_path.as_deref() else {
            return TomlConfig::default();
        };
        if !path.exists() {
            debug!("Config file not found at {}, using defaults", path.display());
            return TomlConfig::default();
        }
        match load_toml_config(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Serialize a config and write it to `path`, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("songlib").join("config.toml"))
}

/// Trim whitespace and trailing slashes so paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
