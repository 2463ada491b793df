//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use campus_server::db::{create_pool_with_options, migrations};

use super::ConfigSource;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}

/// Create any missing tables and indexes, then exit.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = args.source.load()?;
    let url = config.database_url()?;

    let pool = create_pool_with_options(url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Schema is up to date");
    Ok(())
}
