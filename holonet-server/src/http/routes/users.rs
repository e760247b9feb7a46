//! User endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidPath};
use crate::http::server::AppState;
use crate::models::UserView;
use crate::users::{self, Registration};

/// Create user request. Unknown fields such as `role` are ignored by serde.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct UserListResponse {
    pub results: Vec<UserView>,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub results: UserView,
    pub message: &'static str,
}

/// GET /users
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.store().list_users().await?;
    Ok(Json(UserListResponse {
        results: users.into_iter().map(UserView::from).collect(),
        message: "Users List",
    }))
}

/// POST /users - register an active user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let registration = Registration {
        email: req.email.as_deref(),
        password: req.password.as_deref(),
    };
    let user = users::register(state.store(), registration, state.bcrypt_cost).await?;

    Ok(Json(UserResponse {
        results: UserView::from(user),
        message: "User created",
    }))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store()
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User no encontrado"))?;

    Ok(Json(UserResponse {
        results: UserView::from(user),
        message: "Successful!",
    }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::http::routes::testing::{app, seeded_store, send};

    #[tokio::test]
    async fn listed_users_never_expose_password() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "GET", "/users", None).await;

        assert_eq!(status, StatusCode::OK);
        let users = body["results"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["email"], "luke@tatooine.net");
        assert!(users[0].get("password").is_none());
    }

    #[tokio::test]
    async fn create_user_ignores_role_and_hides_password() {
        let app = app(seeded_store().await);
        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(r#"{"email": "han@corellia.net", "password": "kessel", "role": "admin"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["id"], 2);
        assert_eq!(body["results"]["is_active"], true);
        assert!(body["results"].get("password").is_none());
        assert!(body["results"].get("role").is_none());
    }

    #[tokio::test]
    async fn create_user_missing_password_is_400() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "POST", "/users", Some(r#"{"email": "x@y.io"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "password is required in the request body");
    }

    #[tokio::test]
    async fn duplicate_email_is_409() {
        let app = app(seeded_store().await);
        let (status, _) = send(
            &app,
            "POST",
            "/users",
            Some(r#"{"email": "luke@tatooine.net", "password": "again"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let app = app(seeded_store().await);
        let (status, body) = send(&app, "GET", "/users/42", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "User no encontrado");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = app(seeded_store().await);
        let (status, _) = send(&app, "GET", "/users/luke", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
