//! Store selection
//!
//! Decides between PostgreSQL and the in-process store from the command line
//! and environment, and opens the chosen backend.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use holonet_server::db::{create_pool, migrations, PgPool};
use holonet_server::{MemoryStore, PgStore, Store};

/// Where the data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Postgres(String),
    Memory,
}

/// Pick the backend. `--memory` wins; otherwise a database URL selects
/// PostgreSQL, and with neither the in-process store is used with a warning.
pub fn choose_backend(database_url: Option<String>, memory: bool) -> Result<Backend> {
    if memory {
        tracing::info!("Using in-memory store (--memory)");
        return Ok(Backend::Memory);
    }

    match database_url {
        Some(url) => {
            validate_database_url(&url)?;
            Ok(Backend::Postgres(url))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; falling back to in-memory store (data will not persist)"
            );
            Ok(Backend::Memory)
        }
    }
}

/// Accept only PostgreSQL connection strings
pub fn validate_database_url(url: &str) -> Result<()> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(())
    } else {
        bail!("DATABASE_URL must start with postgres:// or postgresql://")
    }
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool> {
    validate_database_url(database_url)?;

    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Open the chosen backend as a shared store handle
pub async fn open_store(backend: &Backend) -> Result<Arc<dyn Store>> {
    match backend {
        Backend::Postgres(url) => {
            let pool = connect_and_migrate(url).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_flag_wins_over_url() {
        let backend = choose_backend(Some("postgres://localhost/holonet".into()), true).unwrap();
        assert_eq!(backend, Backend::Memory);
    }

    #[test]
    fn url_selects_postgres() {
        let backend = choose_backend(Some("postgresql://db/holonet".into()), false).unwrap();
        assert_eq!(backend, Backend::Postgres("postgresql://db/holonet".into()));
    }

    #[test]
    fn no_url_falls_back_to_memory() {
        assert_eq!(choose_backend(None, false).unwrap(), Backend::Memory);
    }

    #[test]
    fn rejects_non_postgres_url() {
        assert!(choose_backend(Some("sqlite://holonet.db".into()), false).is_err());
    }
}
