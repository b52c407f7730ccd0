//! Authentication service for form logins and remember-me tokens.

use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::services::PasswordEncoder;
use crate::domain::credentials::Credentials;
use crate::domain::entities::{NewUser, User, UserRegistration};
use crate::domain::remember_me::RememberMeToken;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Why an authentication attempt failed.
///
/// The first three variants are deliberately rendered as one generic message
/// to the client; they only differ in logs.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login name or password is missing")]
    MissingCredential,
    #[error("user not found")]
    UserNotFound,
    #[error("password does not match")]
    PasswordMismatch,
    #[error(transparent)]
    Repository(#[from] AppError),
}

/// Validates credentials against the user store.
///
/// Generic over the repository so unit tests can use `MockUserRepository`
/// while the running service holds an `AuthService<dyn UserRepository>`.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    encoder: PasswordEncoder,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repository: Arc<R>, encoder: PasswordEncoder) -> Self {
        Self {
            repository,
            encoder,
        }
    }

    /// Encodes a plaintext password the same way stored passwords are encoded.
    pub fn encode_clear_text(&self, clear_text: &str) -> String {
        self.encoder.encode(clear_text)
    }

    /// Looks up a user by login name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] if no such user exists and
    /// [`AuthError::Repository`] on store failures.
    pub async fn load_user_by_login_name(&self, login_name: &str) -> Result<User, AuthError> {
        self.repository
            .find_by_login_name(login_name)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Authenticates submitted form credentials.
    ///
    /// # Flow
    ///
    /// 1. Reject missing login name or password
    /// 2. Look up the user
    /// 3. Encode the submitted password
    /// 4. Compare with the stored encoded password
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let (login_name, password) = credentials
            .complete()
            .ok_or(AuthError::MissingCredential)?;

        let user = self.load_user_by_login_name(login_name).await?;

        let encoded_password = self.encode_clear_text(password);
        if user.password != encoded_password {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(user)
    }

    /// Authenticates a token previously issued by [`Self::remember_me_token`].
    pub async fn authenticate_remember_me(
        &self,
        token: &RememberMeToken,
    ) -> Result<User, AuthError> {
        let user = self.load_user_by_login_name(&token.login_name).await?;

        if user.password != token.encoded_password {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(user)
    }

    /// Builds the persistent login token for an authenticated user.
    pub fn remember_me_token(&self, user: &User) -> RememberMeToken {
        RememberMeToken::new(&user.login_name, &user.password)
    }

    /// Creates an account, encoding the password before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the registration is invalid and
    /// [`AppError::Conflict`] if the login name is taken.
    pub async fn register(&self, registration: &UserRegistration) -> Result<User, AppError> {
        registration.validate().map_err(|e| {
            AppError::bad_request("Invalid user data", json!({ "errors": e.to_string() }))
        })?;

        let new_user = NewUser {
            login_name: registration.login_name.clone(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            password: self.encode_clear_text(&registration.password),
        };

        self.repository.create_user(&new_user).await
    }

    /// Sets a new password for an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn change_password(&self, login_name: &str, clear_text: &str) -> Result<(), AppError> {
        if clear_text.is_empty() {
            return Err(AppError::bad_request(
                "Password must not be empty",
                json!({}),
            ));
        }

        let encoded = self.encode_clear_text(clear_text);
        if !self.repository.update_password(login_name, &encoded).await? {
            return Err(AppError::not_found(
                "User not found",
                json!({ "login_name": login_name }),
            ));
        }

        Ok(())
    }

    /// Reports whether the user store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
