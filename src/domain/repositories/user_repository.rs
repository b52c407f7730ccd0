//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the user store.
///
/// The login flow only ever calls [`UserRepository::find_by_login_name`];
/// the write operations back the `admin` CLI.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by login name (exact, case-sensitive match).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_login_name(&self, login_name: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the login name is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError>;

    /// Lists all users ordered by login name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Replaces the encoded password of a user.
    ///
    /// Returns `Ok(false)` when no user has this login name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_password(
        &self,
        login_name: &str,
        encoded_password: &str,
    ) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
