//! Planet and character endpoints (read-only)

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidPath;
use crate::http::server::AppState;
use crate::models::{Character, Planet};

/// `{results, message}` envelope shared by every catalog response
#[derive(Serialize)]
pub struct CatalogResponse<T> {
    pub results: T,
    pub message: &'static str,
}

/// GET /planets
async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogResponse<Vec<Planet>>>, ApiError> {
    let planets = state.store().list_planets().await?;
    Ok(Json(CatalogResponse {
        results: planets,
        message: "Planets List",
    }))
}

/// GET /planets/{id}
async fn get_planet(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<CatalogResponse<Planet>>, ApiError> {
    let planet = state
        .store()
        .get_planet(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Planet no encontrado"))?;

    Ok(Json(CatalogResponse {
        results: planet,
        message: "Successful!",
    }))
}

/// GET /characters
async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogResponse<Vec<Character>>>, ApiError> {
    let characters = state.store().list_characters().await?;
    Ok(Json(CatalogResponse {
        results: characters,
        message: "Character List",
    }))
}

/// GET /characters/{id}
async fn get_character(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<CatalogResponse<Character>>, ApiError> {
    let character = state
        .store()
        .get_character(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Character no encontrado"))?;

    Ok(Json(CatalogResponse {
        results: character,
        message: "Successful!",
    }))
}

/// Catalog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/planets", get(list_planets))
        .route("/planets/{id}", get(get_planet))
        .route("/characters", get(list_characters))
        .route("/characters/{id}", get(get_character))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::http::routes::testing::{app, seeded_store, send};

    #[tokio::test]
    async fn lists_planets_in_id_order() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "GET", "/planets", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Planets List");
        assert_eq!(body["results"][0], json!({"id": 1, "name": "Tatooine"}));
        assert_eq!(body["results"][2], json!({"id": 3, "name": "Dagobah"}));
    }

    #[tokio::test]
    async fn gets_single_character() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "GET", "/characters/2", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["name"], "Leia Organa");
    }

    #[tokio::test]
    async fn missing_planet_is_404_not_a_crash() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "GET", "/planets/999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Planet no encontrado");
    }

    #[tokio::test]
    async fn missing_character_is_404() {
        let app = app(seeded_store().await);
        let (status, _) = send(&app, "GET", "/characters/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
