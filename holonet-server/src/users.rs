//! User registration
//!
//! Passwords are bcrypt-hashed on a blocking thread before they reach the
//! store; the plaintext never leaves this module.

use thiserror::Error;

use crate::db::{DbError, Store};
use crate::models::{Email, NewUser, Password, User, ValidationError};

/// Work factor used when none is configured
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Raw registration input. `None` means the field was absent from the body.
#[derive(Debug, Default)]
pub struct Registration<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Validate, hash and insert a new active user.
pub async fn register(
    store: &dyn Store,
    registration: Registration<'_>,
    bcrypt_cost: u32,
) -> Result<User, UserError> {
    let email = Email::new(
        registration
            .email
            .ok_or(ValidationError::Missing { field: "email" })?,
    )?;
    let password = Password::new(
        registration
            .password
            .ok_or(ValidationError::Missing { field: "password" })?,
    )?;

    let password_hash =
        tokio::task::spawn_blocking(move || bcrypt::hash(password.expose(), bcrypt_cost))
            .await??;

    let user = store
        .create_user(NewUser {
            email,
            password_hash,
            is_active: true,
        })
        .await?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn stores_hash_not_plaintext() {
        let store = MemoryStore::new();
        let user = register(
            &store,
            Registration {
                email: Some("obiwan@stewjon.org"),
                password: Some("hello there"),
            },
            TEST_COST,
        )
        .await
        .unwrap();

        assert!(user.is_active);
        assert_ne!(user.password, "hello there");
        assert!(bcrypt::verify("hello there", &user.password).unwrap());
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let store = MemoryStore::new();

        let err = register(
            &store,
            Registration {
                email: None,
                password: Some("pw"),
            },
            TEST_COST,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            UserError::Validation(ValidationError::Missing { field: "email" })
        ));

        let err = register(
            &store,
            Registration {
                email: Some("a@b.io"),
                password: None,
            },
            TEST_COST,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            UserError::Validation(ValidationError::Missing { field: "password" })
        ));
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_conflict() {
        let store = MemoryStore::new();
        let reg = || Registration {
            email: Some("yoda@dagobah.net"),
            password: Some("do or do not"),
        };

        register(&store, reg(), TEST_COST).await.unwrap();
        let err = register(&store, reg(), TEST_COST).await.unwrap_err();
        assert!(matches!(err, UserError::Db(DbError::Conflict { .. })));
    }
}
