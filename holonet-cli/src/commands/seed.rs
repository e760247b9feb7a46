//! Catalog seeding
//!
//! Planets and characters have no write endpoints; they come from a TOML
//! file like:
//!
//! ```toml
//! [[planets]]
//! name = "Tatooine"
//!
//! [[characters]]
//! name = "Luke Skywalker"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use holonet_server::models::EntityName;
use holonet_server::Store;
use serde::Deserialize;

use crate::config;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// TOML file with [[planets]] and [[characters]] entries
    pub file: PathBuf,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub planets: Vec<SeedEntry>,
    #[serde(default)]
    pub characters: Vec<SeedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SeedEntry {
    pub name: String,
}

/// Rows inserted by [`apply`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub planets: usize,
    pub characters: usize,
}

/// Read and parse a seed file
pub fn load_seed_file(path: &Path) -> Result<SeedFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid seed file {}", path.display()))
}

/// Insert every entry. All names are validated before anything is written.
pub async fn apply(store: &dyn Store, seed: &SeedFile) -> Result<SeedSummary> {
    let planets = seed
        .planets
        .iter()
        .map(|p| EntityName::planet(&p.name))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid planet in seed file")?;
    let characters = seed
        .characters
        .iter()
        .map(|c| EntityName::character(&c.name))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid character in seed file")?;

    for name in &planets {
        let planet = store.create_planet(name).await?;
        tracing::debug!(planet_id = planet.id, name = %planet.name, "seeded planet");
    }
    for name in &characters {
        let character = store.create_character(name).await?;
        tracing::debug!(character_id = character.id, name = %character.name, "seeded character");
    }

    Ok(SeedSummary {
        planets: planets.len(),
        characters: characters.len(),
    })
}

/// Load a seed file into PostgreSQL
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let seed = load_seed_file(&args.file)?;
    let store = config::open_store(&config::Backend::Postgres(args.database_url)).await?;
    let summary = apply(store.as_ref(), &seed).await?;

    tracing::info!(
        planets = summary.planets,
        characters = summary.characters,
        "Seed complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holonet_server::MemoryStore;
    use std::io::Write;

    fn seed_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_and_applies_seed() {
        let file = seed_file(
            r#"
            [[planets]]
            name = "Tatooine"

            [[planets]]
            name = "Hoth"

            [[characters]]
            name = "Han Solo"
            "#,
        );

        let seed = load_seed_file(file.path()).unwrap();
        let store = MemoryStore::new();
        let summary = apply(&store, &seed).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                planets: 2,
                characters: 1
            }
        );
        let planets = store.list_planets().await.unwrap();
        assert_eq!(planets[1].name, "Hoth");
    }

    #[tokio::test]
    async fn invalid_name_writes_nothing() {
        let file = seed_file(
            r#"
            [[planets]]
            name = "Naboo"

            [[characters]]
            name = "   "
            "#,
        );

        let seed = load_seed_file(file.path()).unwrap();
        let store = MemoryStore::new();
        assert!(apply(&store, &seed).await.is_err());
        assert!(store.list_planets().await.unwrap().is_empty());
    }

    #[test]
    fn missing_sections_are_empty() {
        let file = seed_file("[[characters]]\nname = \"Chewbacca\"\n");
        let seed = load_seed_file(file.path()).unwrap();
        assert!(seed.planets.is_empty());
        assert_eq!(seed.characters.len(), 1);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(load_seed_file(Path::new("/nonexistent/seed.toml")).is_err());
    }
}
