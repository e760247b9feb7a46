//! Shared fixtures for router tests

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use crate::db::{MemoryStore, Store};
use crate::http::server::{build_router, AppState, ServerConfig};
use crate::models::{Email, EntityName, NewUser};

/// Keeps bcrypt fast in tests
pub const TEST_COST: u32 = 4;

/// Store with user 1, planets 1..=3 (Tatooine, Alderaan, Dagobah) and
/// characters 1..=2 (Luke Skywalker, Leia Organa).
pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .create_user(NewUser {
            email: Email::new("luke@tatooine.net").unwrap(),
            password_hash: "$2b$04$notarealhash".into(),
            is_active: true,
        })
        .await
        .unwrap();
    for name in ["Tatooine", "Alderaan", "Dagobah"] {
        store.create_planet(&EntityName::planet(name).unwrap()).await.unwrap();
    }
    for name in ["Luke Skywalker", "Leia Organa"] {
        store
            .create_character(&EntityName::character(name).unwrap())
            .await
            .unwrap();
    }
    store
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    let config = ServerConfig {
        bcrypt_cost: TEST_COST,
        ..ServerConfig::default()
    };
    build_router(AppState::new(store, config.bcrypt_cost), &config)
}

/// Send one request, returning status and parsed JSON body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_owned())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
