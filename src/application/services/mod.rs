//! Business logic services for the application layer.

pub mod auth_service;
pub mod password_encoder;

pub use auth_service::{AuthError, AuthService};
pub use password_encoder::PasswordEncoder;
