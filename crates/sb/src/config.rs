//! Layered settings for the `skillbridge` binary.
//!
//! Sources, highest priority first:
//! 1. `SKILLBRIDGE_*` environment variables. Nested keys use `__` as the
//!    separator (`SKILLBRIDGE_FEATURES__APPLIED_MUTATIONS` -> `features.applied_mutations`),
//!    and the short names in [`ENV_ALIASES`] are accepted as well.
//! 2. the TOML file passed with `--config`, or `skillbridge.toml` in the
//!    working directory when it exists
//! 3. built-in defaults

use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::{Uncased, UncasedStr};
use figment::Figment;
use sb_core::Capabilities;
use sb_serve::middleware::auth::AuthSettings;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "skillbridge.toml";

pub const ENV_PREFIX: &str = "SKILLBRIDGE_";

/// Read by the tracing subscriber directly; wins over `log.filter`.
pub const LOG_ENV: &str = "SKILLBRIDGE_LOG";

/// Flat variable names (after the prefix) and the key each one sets.
pub const ENV_ALIASES: &[(&str, &str)] = &[
    ("host", "server.host"),
    ("port", "server.port"),
    ("db_path", "database.path"),
    ("auto_migrate", "database.auto_migrate"),
    ("auth_mode", "auth.mode"),
    ("auth_header", "auth.user_header"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("config file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthSettings,
    pub features: Capabilities,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4830,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "server.host",
                value: self.host.clone(),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    /// Create missing tables on startup.
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: ".skillbridge/skillbridge.db".to_string(),
            auto_migrate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(path)?.extract().map_err(ConfigError::from)
    }

    /// Build the provider chain. An explicit `path` must exist; the default
    /// file is only merged when present.
    pub fn figment(path: Option<&Path>) -> Result<Figment, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.exists().then_some(fallback)
            }
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        Ok(figment.merge(env_provider()))
    }
}

/// `SKILLBRIDGE_LOG` belongs to the subscriber, not to the `log` table.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).ignore(&["log"]).map(env_key)
}

fn env_key(key: &UncasedStr) -> Uncased<'_> {
    let alias = ENV_ALIASES
        .iter()
        .find(|(alias, _)| key.as_str().eq_ignore_ascii_case(alias));
    match alias {
        Some((_, path)) => Uncased::from_borrowed(path),
        None => Uncased::from(key.as_str().replace("__", ".")),
    }
}
