//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`credentials`] - Login form input
//! - [`remember_me`] - Persistent login token format
//! - [`session`] - Server-side session contents
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod credentials;
pub mod entities;
pub mod remember_me;
pub mod repositories;
pub mod session;
