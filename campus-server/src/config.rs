//! Server configuration
//!
//! Precedence, lowest first: built-in defaults, TOML file, environment
//! variables, then whatever the caller (the CLI) overrides afterwards.
//!
//! ```toml
//! bind_addr = "0.0.0.0:8080"
//! cors_permissive = false
//! storage = "postgres"
//!
//! [database]
//! url = "postgres://localhost/campus"
//! max_connections = 5
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "campus.toml";

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "CAMPUS_BIND_ADDR";
pub const ENV_STORAGE: &str = "CAMPUS_STORAGE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("database URL not set. Set via --database-url, DATABASE_URL or [database].url")]
    MissingDatabaseUrl,
}

/// Where rows live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    pub storage: StorageBackend,

    pub database: DatabaseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: false,
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load defaults, then the TOML file, then the process environment.
    ///
    /// An explicit `path` must exist; without one, `campus.toml` in the
    /// working directory is used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
            self.database.url = Some(url);
        }

        if let Some(value) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_BIND_ADDR,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_STORAGE) {
            self.storage = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_STORAGE,
                value: value.clone(),
            })?;
        }

        Ok(())
    }

    /// Database URL, required for the PostgreSQL backend.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
