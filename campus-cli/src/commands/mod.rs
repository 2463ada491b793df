//! Command implementations for the campus CLI

pub mod migrate;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use campus_server::ServerConfig;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Where configuration comes from, shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigSource {
    /// Path to a TOML config file (default: ./campus.toml if present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Database URL (overrides config file and environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl ConfigSource {
    /// Defaults, then the config file, then the environment, then flags.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref()).with_context(|| {
            match &self.config {
                Some(path) => format!("Failed to load config from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            }
        })?;

        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }

        Ok(config)
    }
}
