//! Favorites endpoints
//!
//! Thin wrappers over [`FavoritesManager`]; every rule about validation
//! order and duplicates lives there.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::favorites::FavoritesManager;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::{CharacterFavoriteDetail, PlanetFavoriteDetail};

/// Add planet favorite request. Absent key is `None`, `null` is `Some(None)`.
#[derive(Deserialize)]
pub struct AddPlanetRequest {
    #[serde(default, deserialize_with = "present")]
    pub planet_id: Option<Option<i32>>,
}

/// Add character favorite request. Absent key is `None`, `null` is `Some(None)`.
#[derive(Deserialize)]
pub struct AddCharacterRequest {
    #[serde(default, deserialize_with = "present")]
    pub character_id: Option<Option<i32>>,
}

/// Only runs when the key is in the body, so a `null` value stays distinct
/// from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

#[derive(Serialize)]
pub struct UserFavoritesResponse {
    pub planet_favorites: Vec<PlanetFavoriteDetail>,
    pub character_favorites: Vec<CharacterFavoriteDetail>,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct AddedResponse<T> {
    pub message: String,
    pub results: T,
}

#[derive(Serialize)]
pub struct RemovedResponse {
    pub message: String,
}

/// GET /users/{id}/favorites
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    ValidPath(user_id): ValidPath<i32>,
) -> Result<Json<UserFavoritesResponse>, ApiError> {
    let favorites = FavoritesManager::new(state.store()).list(user_id).await?;
    Ok(Json(UserFavoritesResponse {
        planet_favorites: favorites.planet_favorites,
        character_favorites: favorites.character_favorites,
        message: "User Favorites List",
    }))
}

/// POST /favorites/{user_id}/planets
async fn add_planet(
    State(state): State<Arc<AppState>>,
    ValidPath(user_id): ValidPath<i32>,
    ValidJson(req): ValidJson<AddPlanetRequest>,
) -> Result<Json<AddedResponse<PlanetFavoriteDetail>>, ApiError> {
    let added = FavoritesManager::new(state.store())
        .add_planet(user_id, req.planet_id)
        .await?;
    Ok(Json(AddedResponse {
        message: added.message,
        results: added.favorite,
    }))
}

/// POST /favorites/{user_id}/characters
async fn add_character(
    State(state): State<Arc<AppState>>,
    ValidPath(user_id): ValidPath<i32>,
    ValidJson(req): ValidJson<AddCharacterRequest>,
) -> Result<Json<AddedResponse<CharacterFavoriteDetail>>, ApiError> {
    let added = FavoritesManager::new(state.store())
        .add_character(user_id, req.character_id)
        .await?;
    Ok(Json(AddedResponse {
        message: added.message,
        results: added.favorite,
    }))
}

/// DELETE /favorites/{user_id}/planets/{planet_id}
async fn remove_planet(
    State(state): State<Arc<AppState>>,
    ValidPath((user_id, planet_id)): ValidPath<(i32, i32)>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let message = FavoritesManager::new(state.store())
        .remove_planet(user_id, planet_id)
        .await?;
    Ok(Json(RemovedResponse { message }))
}

/// DELETE /favorites/{user_id}/characters/{character_id}
async fn remove_character(
    State(state): State<Arc<AppState>>,
    ValidPath((user_id, character_id)): ValidPath<(i32, i32)>,
) -> Result<Json<RemovedResponse>, ApiError> {
    let message = FavoritesManager::new(state.store())
        .remove_character(user_id, character_id)
        .await?;
    Ok(Json(RemovedResponse { message }))
}

/// Favorites routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{id}/favorites", get(list_favorites))
        .route("/favorites/{user_id}/planets", post(add_planet))
        .route("/favorites/{user_id}/characters", post(add_character))
        .route("/favorites/{user_id}/planets/{planet_id}", delete(remove_planet))
        .route(
            "/favorites/{user_id}/characters/{character_id}",
            delete(remove_character),
        )
}
