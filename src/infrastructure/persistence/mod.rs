//! PostgreSQL repository implementations.
//!
//! - [`PgUserRepository`] - User account lookup and administration

pub mod pg_user_repository;

pub use pg_user_repository::PgUserRepository;
