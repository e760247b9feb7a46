//! Favorite join rows
//!
//! The bare rows are what the store inserts and deletes. The `*Detail`
//! variants carry the joined target name and are the only form serialized.

use serde::Serialize;
use sqlx::FromRow;

/// Row of `planet_favorites`
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct PlanetFavorite {
    pub id: i32,
    pub user_id: i32,
    pub planet_id: i32,
}

/// Row of `character_favorites`
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct CharacterFavorite {
    pub id: i32,
    pub user_id: i32,
    pub character_id: i32,
}

#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct PlanetFavoriteDetail {
    pub id: i32,
    pub user_id: i32,
    pub planet_id: i32,
    pub planet_name: String,
}

impl PlanetFavoriteDetail {
    pub fn new(row: PlanetFavorite, planet_name: impl Into<String>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            planet_id: row.planet_id,
            planet_name: planet_name.into(),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct CharacterFavoriteDetail {
    pub id: i32,
    pub user_id: i32,
    pub character_id: i32,
    pub character_name: String,
}

impl CharacterFavoriteDetail {
    pub fn new(row: CharacterFavorite, character_name: impl Into<String>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            character_id: row.character_id,
            character_name: character_name.into(),
        }
    }
}

/// Everything a user has bookmarked
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFavorites {
    pub planet_favorites: Vec<PlanetFavoriteDetail>,
    pub character_favorites: Vec<CharacterFavoriteDetail>,
}
