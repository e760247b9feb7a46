//! PostgreSQL store
//!
//! - create_user: plain INSERT, unique violation on email becomes `Conflict`
//! - favorites listing: JOIN on the target table for its name (no N+1)
//! - favorites lookup: ORDER BY id so "first match" is stable

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, Store};
use crate::models::{
    Character, CharacterFavorite, CharacterFavoriteDetail, EntityName, NewUser, Planet,
    PlanetFavorite, PlanetFavoriteDetail, User,
};

/// Store backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_active FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, is_active
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DbError::Conflict {
                resource: "user",
                detail: format!("email '{}' is already registered", user.email.as_str()),
            },
            other => DbError::Sqlx(other),
        })
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        let planets = sqlx::query_as::<_, Planet>("SELECT id, name FROM planets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(planets)
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError> {
        let planet = sqlx::query_as::<_, Planet>("SELECT id, name FROM planets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(planet)
    }

    async fn create_planet(&self, name: &EntityName) -> Result<Planet, DbError> {
        let planet = sqlx::query_as::<_, Planet>(
            "INSERT INTO planets (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(planet)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, DbError> {
        let characters =
            sqlx::query_as::<_, Character>("SELECT id, name FROM characters ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(characters)
    }

    async fn get_character(&self, id: i32) -> Result<Option<Character>, DbError> {
        let character =
            sqlx::query_as::<_, Character>("SELECT id, name FROM characters WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(character)
    }

    async fn create_character(&self, name: &EntityName) -> Result<Character, DbError> {
        let character = sqlx::query_as::<_, Character>(
            "INSERT INTO characters (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(character)
    }

    async fn insert_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<PlanetFavorite, DbError> {
        let row = sqlx::query_as::<_, PlanetFavorite>(
            r#"
            INSERT INTO planet_favorites (user_id, planet_id)
            VALUES ($1, $2)
            RETURNING id, user_id, planet_id
            "#,
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<Option<PlanetFavorite>, DbError> {
        let row = sqlx::query_as::<_, PlanetFavorite>(
            r#"
            SELECT id, user_id, planet_id
            FROM planet_favorites
            WHERE user_id = $1 AND planet_id = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_planet_favorite(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM planet_favorites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_planet_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<PlanetFavoriteDetail>, DbError> {
        let rows = sqlx::query_as::<_, PlanetFavoriteDetail>(
            r#"
            SELECT f.id, f.user_id, f.planet_id, p.name AS planet_name
            FROM planet_favorites f
            JOIN planets p ON p.id = f.planet_id
            WHERE f.user_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<CharacterFavorite, DbError> {
        let row = sqlx::query_as::<_, CharacterFavorite>(
            r#"
            INSERT INTO character_favorites (user_id, character_id)
            VALUES ($1, $2)
            RETURNING id, user_id, character_id
            "#,
        )
        .bind(user_id)
        .bind(character_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<Option<CharacterFavorite>, DbError> {
        let row = sqlx::query_as::<_, CharacterFavorite>(
            r#"
            SELECT id, user_id, character_id
            FROM character_favorites
            WHERE user_id = $1 AND character_id = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(character_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_character_favorite(&self, id: i32) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM character_favorites WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_character_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<CharacterFavoriteDetail>, DbError> {
        let rows = sqlx::query_as::<_, CharacterFavoriteDetail>(
            r#"
            SELECT f.id, f.user_id, f.character_id, c.name AS character_name
            FROM character_favorites f
            JOIN characters c ON c.id = f.character_id
            WHERE f.user_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
