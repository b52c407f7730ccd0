//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::auth_service::AuthService`] - Credential and remember-me authentication
//! - [`services::password_encoder::PasswordEncoder`] - One-way password encoding

pub mod services;
