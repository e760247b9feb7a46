//! Favorites manager - bookmarking planets and characters for a user
//!
//! Check order for adds: required id present, user exists, target exists.
//! An id sent as `null` counts as present and fails the target lookup.
//! Check order for removes: user exists, matching favorite exists, target
//! exists (its name goes into the confirmation). Duplicates are allowed:
//! every add inserts a new row, every remove deletes only the first match.

use thiserror::Error;

use crate::db::{DbError, Store};
use crate::models::{
    CharacterFavoriteDetail, PlanetFavoriteDetail, User, UserFavorites, ValidationError,
};

/// Favorites error type. Display strings are the client-facing messages.
#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User no encontrado")]
    UserNotFound { user_id: i32 },

    #[error("Planet no encontrado")]
    PlanetNotFound { planet_id: Option<i32> },

    #[error("Character no encontrado")]
    CharacterNotFound { character_id: Option<i32> },

    #[error("Planeta favorito no encontrado para este usuario")]
    PlanetFavoriteNotFound { user_id: i32, planet_id: i32 },

    #[error("Personaje favorito no encontrado para este usuario")]
    CharacterFavoriteNotFound { user_id: i32, character_id: i32 },

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result of a successful add
#[derive(Debug, Clone)]
pub struct Added<T> {
    pub message: String,
    pub favorite: T,
}

/// Favorites operations over an injected store
pub struct FavoritesManager<'a> {
    store: &'a dyn Store,
}

impl<'a> FavoritesManager<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Bookmark a planet. The outer `None` means the request omitted
    /// `planet_id`, `Some(None)` means it was sent as `null`.
    pub async fn add_planet(
        &self,
        user_id: i32,
        planet_id: Option<Option<i32>>,
    ) -> Result<Added<PlanetFavoriteDetail>, FavoriteError> {
        let planet_id = planet_id.ok_or(ValidationError::Missing { field: "planet_id" })?;
        self.require_user(user_id).await?;
        let planet = match planet_id {
            Some(id) => self.store.get_planet(id).await?,
            None => None,
        }
        .ok_or(FavoriteError::PlanetNotFound { planet_id })?;

        let row = self.store.insert_planet_favorite(user_id, planet.id).await?;
        tracing::info!(
            user_id,
            planet_id = planet.id,
            favorite_id = row.id,
            "planet favorite added"
        );

        Ok(Added {
            message: format!("Planet favorite added for user {user_id}"),
            favorite: PlanetFavoriteDetail::new(row, planet.name),
        })
    }

    /// Bookmark a character. Same absent/null convention as [`Self::add_planet`].
    pub async fn add_character(
        &self,
        user_id: i32,
        character_id: Option<Option<i32>>,
    ) -> Result<Added<CharacterFavoriteDetail>, FavoriteError> {
        let character_id =
            character_id.ok_or(ValidationError::Missing { field: "character_id" })?;
        self.require_user(user_id).await?;
        let character = match character_id {
            Some(id) => self.store.get_character(id).await?,
            None => None,
        }
        .ok_or(FavoriteError::CharacterNotFound { character_id })?;

        let row = self
            .store
            .insert_character_favorite(user_id, character.id)
            .await?;
        tracing::info!(
            user_id,
            character_id = character.id,
            favorite_id = row.id,
            "character favorite added"
        );

        Ok(Added {
            message: format!("Character favorite added for user {user_id}"),
            favorite: CharacterFavoriteDetail::new(row, character.name),
        })
    }

    /// Remove the first matching planet favorite, returning the confirmation message.
    pub async fn remove_planet(
        &self,
        user_id: i32,
        planet_id: i32,
    ) -> Result<String, FavoriteError> {
        self.require_user(user_id).await?;
        let row = self
            .store
            .find_planet_favorite(user_id, planet_id)
            .await?
            .ok_or(FavoriteError::PlanetFavoriteNotFound { user_id, planet_id })?;
        let planet = self
            .store
            .get_planet(planet_id)
            .await?
            .ok_or(FavoriteError::PlanetNotFound {
                planet_id: Some(planet_id),
            })?;

        // Lost a race with a concurrent remove of the same row
        if !self.store.delete_planet_favorite(row.id).await? {
            return Err(FavoriteError::PlanetFavoriteNotFound { user_id, planet_id });
        }
        tracing::info!(user_id, planet_id, favorite_id = row.id, "planet favorite removed");

        Ok(format!(
            "Planeta favorito:{} con id:{}, eliminado correctamente para el usuario {}",
            planet.name, planet_id, user_id
        ))
    }

    /// Remove the first matching character favorite, returning the confirmation message.
    pub async fn remove_character(
        &self,
        user_id: i32,
        character_id: i32,
    ) -> Result<String, FavoriteError> {
        self.require_user(user_id).await?;
        let row = self
            .store
            .find_character_favorite(user_id, character_id)
            .await?
            .ok_or(FavoriteError::CharacterFavoriteNotFound {
                user_id,
                character_id,
            })?;
        let character = self
            .store
            .get_character(character_id)
            .await?
            .ok_or(FavoriteError::CharacterNotFound {
                character_id: Some(character_id),
            })?;

        if !self.store.delete_character_favorite(row.id).await? {
            return Err(FavoriteError::CharacterFavoriteNotFound {
                user_id,
                character_id,
            });
        }
        tracing::info!(user_id, character_id, favorite_id = row.id, "character favorite removed");

        Ok(format!(
            "Personaje favorito:{},con id: {}, eliminado correctamente para el usuario {}",
            character.name, character_id, user_id
        ))
    }

    /// All favorites of a user. Unknown users simply have none.
    pub async fn list(&self, user_id: i32) -> Result<UserFavorites, FavoriteError> {
        Ok(UserFavorites {
            planet_favorites: self.store.list_planet_favorites(user_id).await?,
            character_favorites: self.store.list_character_favorites(user_id).await?,
        })
    }

    async fn require_user(&self, user_id: i32) -> Result<User, FavoriteError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(FavoriteError::UserNotFound { user_id })
    }
}
