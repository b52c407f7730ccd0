//! Core domain entities.
//!
//! - [`User`] - A registered account, read by the login flow
//! - [`NewUser`] - Insert payload carrying an already encoded password
//! - [`UserRegistration`] - Validated account creation request

pub mod user;

pub use user::{NewUser, User, UserRegistration};
