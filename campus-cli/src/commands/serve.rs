//! HTTP server command
//!
//! Runs the campus REST API with either PostgreSQL or in-memory storage.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use campus_server::{run_server, ServerConfig, StorageBackend};

use super::ConfigSource;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Address to bind to (default: 127.0.0.1:8080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Keep all data in memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Layer the command-line flags over the loaded configuration.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = self.source.load()?;

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if self.in_memory {
            config.storage = StorageBackend::Memory;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }

        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.resolve()?;

    tracing::info!(storage = ?config.storage, "Starting campus server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(
            &path,
            "bind_addr = \"127.0.0.1:9000\"\nstorage = \"postgres\"\n",
        )
        .unwrap();

        let args = ServeArgs {
            source: ConfigSource {
                config: Some(path),
                database_url: Some("postgres://flag/campus".into()),
            },
            bind: Some("0.0.0.0:7070".parse().unwrap()),
            in_memory: true,
            cors_permissive: true,
        };

        let config = args.resolve().unwrap();
        assert_eq!(config.bind_addr.port(), 7070);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.cors_permissive);
        assert_eq!(config.database_url().unwrap(), "postgres://flag/campus");
    }

    #[test]
    fn absent_flags_keep_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:9000\"\ncors_permissive = true\n").unwrap();

        let args = ServeArgs {
            source: ConfigSource {
                config: Some(path),
                database_url: None,
            },
            ..Default::default()
        };

        let config = args.resolve().unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(config.cors_permissive);
    }
}
