//! HTTP server command
//!
//! Runs the holonet API against PostgreSQL or the in-process store.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use holonet_server::{run_server, ServerConfig, DEFAULT_BCRYPT_COST};

use super::seed;
use crate::config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "HOLONET_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Port to listen on (overrides the port part of --bind)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Use the in-process store even if DATABASE_URL is set
    #[arg(long)]
    pub memory: bool,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// bcrypt work factor for new passwords
    #[arg(
        long,
        env = "HOLONET_BCRYPT_COST",
        default_value_t = DEFAULT_BCRYPT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub bcrypt_cost: u32,

    /// Seed file to load before serving
    #[arg(long)]
    pub seed: Option<PathBuf>,
}

impl ServeArgs {
    fn bind_addr(&self) -> SocketAddr {
        let mut addr = self.bind;
        if let Some(port) = self.port {
            addr.set_port(port);
        }
        addr
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let bind_addr = args.bind_addr();
    let backend = config::choose_backend(args.database_url.clone(), args.memory)?;
    let store = config::open_store(&backend).await?;

    if let Some(path) = &args.seed {
        let seed_file = seed::load_seed_file(path)?;
        let summary = seed::apply(store.as_ref(), &seed_file).await?;
        tracing::info!(
            planets = summary.planets,
            characters = summary.characters,
            "Loaded seed file {}",
            path.display()
        );
    }

    let config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive,
        bcrypt_cost: args.bcrypt_cost,
    };

    tracing::info!("Starting holonet server on {}", bind_addr);

    // Run server (blocks until shutdown)
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_overrides_bind_port() {
        let args = ServeArgs::parse_from(["serve", "--bind", "127.0.0.1:8080", "--port", "5000"]);
        assert_eq!(args.bind_addr(), "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert!(ServeArgs::try_parse_from(["serve", "--bcrypt-cost", "2"]).is_err());
    }
}
