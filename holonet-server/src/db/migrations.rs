//! Schema bootstrap for the holonet tables
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so this runs on each
//! server start. Favorites reference their targets but nothing cascades.

use sqlx::PgPool;

use super::DbError;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            email VARCHAR(120) NOT NULL UNIQUE,
            password VARCHAR(80) NOT NULL,
            is_active BOOLEAN NOT NULL
        )
        "#,
    ),
    (
        "planets",
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id SERIAL PRIMARY KEY,
            name VARCHAR(120) NOT NULL
        )
        "#,
    ),
    (
        "characters",
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id SERIAL PRIMARY KEY,
            name VARCHAR(150) NOT NULL
        )
        "#,
    ),
    (
        "planet_favorites",
        r#"
        CREATE TABLE IF NOT EXISTS planet_favorites (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            planet_id INTEGER NOT NULL REFERENCES planets(id)
        )
        "#,
    ),
    (
        "character_favorites",
        r#"
        CREATE TABLE IF NOT EXISTS character_favorites (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id),
            character_id INTEGER NOT NULL REFERENCES characters(id)
        )
        "#,
    ),
];

/// Create all tables and indexes
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running holonet migrations...");

    for &(table, ddl) in TABLES {
        tracing::debug!(table, "ensuring table");
        sqlx::query(ddl).execute(pool).await?;
    }

    create_indexes(pool).await?;

    tracing::info!("holonet migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    // Lookups by user and by (user, target)
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_planet_favorites_user ON planet_favorites(user_id, planet_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_character_favorites_user ON character_favorites(user_id, character_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
