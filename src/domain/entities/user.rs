//! User entity and account registration input.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use validator::Validate;

/// Login names are restricted to characters that are safe inside a cookie
/// value. `:` in particular is excluded because it separates the login name
/// from the password in the remember-me token.
static LOGIN_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._@-]+$").unwrap());

/// A registered user of the tracker.
///
/// `password` always holds the encoded form produced by
/// [`crate::application::services::PasswordEncoder`], never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login_name: String,
    pub name: String,
    pub email: Option<String>,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Row data for inserting a user. `password` is already encoded.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login_name: String,
    pub name: String,
    pub email: Option<String>,
    pub password: String,
}

/// Account creation request as entered by an administrator.
#[derive(Debug, Clone, Validate)]
pub struct UserRegistration {
    #[validate(length(min = 1, max = 50))]
    #[validate(regex(path = "*LOGIN_NAME_REGEX"))]
    pub login_name: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: Option<String>,

    /// Plaintext; encoded before it reaches the repository.
    #[validate(length(min = 1))]
    pub password: String,
}
