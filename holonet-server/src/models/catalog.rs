//! Planets and characters - read-only over HTTP, created by seeding

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Column widths for `planets.name` and `characters.name`
pub const MAX_PLANET_NAME_LEN: usize = 120;
pub const MAX_CHARACTER_NAME_LEN: usize = 150;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Planet {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i32,
    pub name: String,
}

/// Validated display name for a planet or character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName(String);

impl EntityName {
    pub fn planet(s: &str) -> Result<Self, ValidationError> {
        Self::new("planet name", s, MAX_PLANET_NAME_LEN)
    }

    pub fn character(s: &str) -> Result<Self, ValidationError> {
        Self::new("character name", s, MAX_CHARACTER_NAME_LEN)
    }

    fn new(field: &'static str, s: &str, max: usize) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if s.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
