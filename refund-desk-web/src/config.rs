//! Configuration file loading.
//!
//! The file is TOML; every section and field has a default, so an empty (or
//! missing) file yields a server on `127.0.0.1:8080` with an in-memory cache.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use refund_desk_client::{DEFAULT_IBAN_ENDPOINT, IbanClientConfig};
use refund_desk_core::types::User;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "REFUND_DESK_CONFIG";
/// Environment variable overriding `iban_validation.api_key`
pub const API_KEY_ENV: &str = "API_NINJAS_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub iban_validation: IbanValidationConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads; actix default (one per core) when unset
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IbanValidationConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
}

impl Default for IbanValidationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_IBAN_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl IbanValidationConfig {
    /// Lookup client settings, with the API key taken from the environment when set.
    pub fn client_config(&self) -> IbanClientConfig {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.api_key.clone());

        let config = IbanClientConfig::new(api_key).with_endpoint(self.endpoint.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Entry lifetime for the memory backend; `0` disables expiry
    pub ttl_secs: u64,
    /// Directory for the file backend
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ttl_secs: 3600,
            dir: PathBuf::from("data/iban-cache"),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    /// Write daily rolling files here instead of stdout
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            dir: None,
        }
    }
}

impl Config {
    /// Path from `REFUND_DESK_CONFIG`, or `config.toml`
    pub fn path_from_env() -> PathBuf {
        env::var_os(CONFIG_PATH_ENV).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
    }

    /// Load the file at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for user in &self.users {
            if !seen.insert(user.id) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate user id {}",
                    user.id
                )));
            }
        }
        if self.iban_validation.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "iban_validation.endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
