//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod catalog;
pub mod favorite;

pub use validation::ValidationError;
pub use user::{Email, NewUser, Password, User, UserView};
pub use catalog::{Character, EntityName, Planet};
pub use favorite::{
    CharacterFavorite, CharacterFavoriteDetail, PlanetFavorite, PlanetFavoriteDetail,
    UserFavorites,
};
