//! holonet-server: REST API over users, planets, characters and favorites
//!
//! Layers, leaf first:
//! - [`models`]: validated domain types
//! - [`db`]: the injected [`Store`] with PostgreSQL and in-memory backends
//! - [`favorites`] and [`users`]: the rules behind the write endpoints
//! - [`http`]: axum router, extractors and error mapping

pub mod db;
pub mod favorites;
pub mod http;
pub mod models;
pub mod users;

pub use db::{DbError, MemoryStore, PgStore, Store};
pub use favorites::{FavoriteError, FavoritesManager};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use users::DEFAULT_BCRYPT_COST;
