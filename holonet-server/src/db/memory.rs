//! In-process store for tests and database-less runs
//!
//! Behaves like the PostgreSQL tables: serial ids that never repeat, unique
//! emails, id-ordered listings. Nothing is persisted.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, Store};
use crate::models::{
    Character, CharacterFavorite, CharacterFavoriteDetail, EntityName, NewUser, Planet,
    PlanetFavorite, PlanetFavoriteDetail, User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    planets: Vec<Planet>,
    characters: Vec<Character>,
    planet_favorites: Vec<PlanetFavorite>,
    character_favorites: Vec<CharacterFavorite>,
    sequences: Sequences,
}

/// Last id handed out per table, like a SERIAL column
#[derive(Default)]
struct Sequences {
    users: i32,
    planets: i32,
    characters: i32,
    planet_favorites: i32,
    character_favorites: i32,
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DbError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email.as_str()) {
            return Err(DbError::Conflict {
                resource: "user",
                detail: format!("email '{}' is already registered", user.email.as_str()),
            });
        }

        let row = User {
            id: next(&mut tables.sequences.users),
            email: user.email.as_str().to_owned(),
            password: user.password_hash,
            is_active: user.is_active,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, DbError> {
        Ok(self.tables.read().await.planets.clone())
    }

    async fn get_planet(&self, id: i32) -> Result<Option<Planet>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.planets.iter().find(|p| p.id == id).cloned())
    }

    async fn create_planet(&self, name: &EntityName) -> Result<Planet, DbError> {
        let mut tables = self.tables.write().await;
        let row = Planet {
            id: next(&mut tables.sequences.planets),
            name: name.as_str().to_owned(),
        };
        tables.planets.push(row.clone());
        Ok(row)
    }

    async fn list_characters(&self) -> Result<Vec<Character>, DbError> {
        Ok(self.tables.read().await.characters.clone())
    }

    async fn get_character(&self, id: i32) -> Result<Option<Character>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn create_character(&self, name: &EntityName) -> Result<Character, DbError> {
        let mut tables = self.tables.write().await;
        let row = Character {
            id: next(&mut tables.sequences.characters),
            name: name.as_str().to_owned(),
        };
        tables.characters.push(row.clone());
        Ok(row)
    }

    async fn insert_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<PlanetFavorite, DbError> {
        let mut tables = self.tables.write().await;
        let row = PlanetFavorite {
            id: next(&mut tables.sequences.planet_favorites),
            user_id,
            planet_id,
        };
        tables.planet_favorites.push(row.clone());
        Ok(row)
    }

    async fn find_planet_favorite(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<Option<PlanetFavorite>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .planet_favorites
            .iter()
            .find(|f| f.user_id == user_id && f.planet_id == planet_id)
            .cloned())
    }

    async fn delete_planet_favorite(&self, id: i32) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.planet_favorites.len();
        tables.planet_favorites.retain(|f| f.id != id);
        Ok(tables.planet_favorites.len() < before)
    }

    async fn list_planet_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<PlanetFavoriteDetail>, DbError> {
        let tables = self.tables.read().await;
        // Inner-join semantics: rows whose planet is gone are skipped.
        let rows = tables
            .planet_favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| {
                tables
                    .planets
                    .iter()
                    .find(|p| p.id == f.planet_id)
                    .map(|p| PlanetFavoriteDetail::new(f.clone(), p.name.clone()))
            })
            .collect();
        Ok(rows)
    }

    async fn insert_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<CharacterFavorite, DbError> {
        let mut tables = self.tables.write().await;
        let row = CharacterFavorite {
            id: next(&mut tables.sequences.character_favorites),
            user_id,
            character_id,
        };
        tables.character_favorites.push(row.clone());
        Ok(row)
    }

    async fn find_character_favorite(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<Option<CharacterFavorite>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .character_favorites
            .iter()
            .find(|f| f.user_id == user_id && f.character_id == character_id)
            .cloned())
    }

    async fn delete_character_favorite(&self, id: i32) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.character_favorites.len();
        tables.character_favorites.retain(|f| f.id != id);
        Ok(tables.character_favorites.len() < before)
    }

    async fn list_character_favorites(
        &self,
        user_id: i32,
    ) -> Result<Vec<CharacterFavoriteDetail>, DbError> {
        let tables = self.tables.read().await;
        let rows = tables
            .character_favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| {
                tables
                    .characters
                    .iter()
                    .find(|c| c.id == f.character_id)
                    .map(|c| CharacterFavoriteDetail::new(f.clone(), c.name.clone()))
            })
            .collect();
        Ok(rows)
    }
}
