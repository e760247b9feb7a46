//! Database layer - store trait, connection pool and implementations
//!
//! # Design Principles
//!
//! - Handlers receive the store through router state, never a global
//! - Single-row writes only, no multi-statement transactions
//! - Favorite listings use JOINs for target names (no N+1)
//! - Rely on DB constraints for email uniqueness, map violations to `Conflict`

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    Character, CharacterFavorite, CharacterFavoriteDetail, EntityName, NewUser, Planet,
    PlanetFavorite, PlanetFavoriteDetail, User,
};

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use sqlx::PgPool;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict on {resource}: {detail}")]
    Conflict { resource: &'static str, detail: String },
}

/// Storage for users, planets, characters and the two favorites tables.
///
/// Lookups return `Ok(None)` for absent rows; deciding whether absence is an
/// error belongs to the caller.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Cheap connectivity probe
    async fn ping(&self) -> Result<(), DbError>;

    async fn list_users(&self) -> Result<Vec<User>, DbError>;
    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError>;
    /// Fails with `DbError::Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, DbError>;

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError>;
    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError>;
    async fn create_planet(&self, name: &EntityName) -> Result<Planet, DbError>;

    async fn list_characters(&self) -> Result<Vec<Character>, DbError>;
    async fn get_character(&self, id: i32) -> Result<Option<Character>, DbError>;
    async fn create_character(&self, name: &EntityName) -> Result<Character, DbError>;

    async fn insert_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<PlanetFavorite, DbError>;
    /// First row (lowest id) matching both ids.
    async fn find_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<Option<PlanetFavorite>, DbError>;
    /// Returns whether a row was removed.
    async fn delete_planet_favorite(&self, id: i32) -> Result<bool, DbError>;
    async fn list_planet_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<PlanetFavoriteDetail>, DbError>;

    async fn insert_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<CharacterFavorite, DbError>;
    async fn find_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<Option<CharacterFavorite>, DbError>;
    async fn delete_character_favorite(&self, id: i32) -> Result<bool, DbError>;
    async fn list_character_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<CharacterFavoriteDetail>, DbError>;
}
