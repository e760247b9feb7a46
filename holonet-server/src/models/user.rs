//! User records, validated credentials and the public user view
//!
//! `User` mirrors the table row and is never serialized. Everything that
//! crosses the HTTP boundary goes through `UserView`, which has no password
//! field at all.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for email addresses (matches the `users.email` column)
const MAX_EMAIL_LEN: usize = 120;

/// bcrypt only looks at the first 72 bytes of its input
const MAX_PASSWORD_LEN: usize = 72;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// User record from the store. `password` holds a bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

/// User ready to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub is_active: bool,
}

/// Serialized form of a user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            is_active: u.is_active,
        }
    }
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use holonet_server::models::Email;
    ///
    /// assert!(Email::new("leia@alderaan.org").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if s.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Plaintext password accepted at registration, before hashing
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }

        if s.len() > MAX_PASSWORD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_PASSWORD_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keeps plaintext out of logs.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(Email::new("luke@tatooine.net").is_ok());
        assert!(Email::new("  han.solo@falcon.io ").is_ok());
    }

    #[test]
    fn email_is_trimmed() {
        let email = Email::new("  han@falcon.io\n").unwrap();
        assert_eq!(email.as_str(), "han@falcon.io");
    }

    #[test]
    fn rejects_bad_emails() {
        assert!(matches!(
            Email::new("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
        assert!(matches!(
            Email::new("vader").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(matches!(
            Email::new("a b@c.d").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn email_max_length() {
        let local = "a".repeat(MAX_EMAIL_LEN - "@x.io".len());
        assert!(Email::new(&format!("{local}@x.io")).is_ok());

        let err = Email::new(&format!("a{local}@x.io")).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 120, .. }));
    }

    #[test]
    fn password_rules() {
        assert!(Password::new("hunter2").is_ok());
        assert!(matches!(
            Password::new("").unwrap_err(),
            ValidationError::Empty { field: "password" }
        ));
        assert!(Password::new(&"x".repeat(73)).is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let pw = Password::new("hunter2").unwrap();
        assert!(!format!("{pw:?}").contains("hunter2"));
    }

    #[test]
    fn user_view_has_no_password() {
        let user = User {
            id: 1,
            email: "luke@tatooine.net".into(),
            password: "$2b$04$secret".into(),
            is_active: true,
        };
        let json = serde_json::to_value(UserView::from(user)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert_eq!(obj.len(), 3);
        assert_eq!(json["email"], "luke@tatooine.net");
    }
}
