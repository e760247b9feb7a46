//! Schema bootstrap command

use anyhow::Result;
use clap::Parser;

use crate::config;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

/// Create any missing tables and indexes
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    config::connect_and_migrate(&args.database_url).await?;
    tracing::info!("Schema is up to date");
    Ok(())
}
