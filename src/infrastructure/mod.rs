//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`session`] - Server-side session stores (PostgreSQL, Redis, in-memory)

pub mod persistence;
pub mod session;
