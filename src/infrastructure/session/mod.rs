//! Server-side session storage on top of `tower-sessions`.
//!
//! [`SessionBackend`] is the store chosen at startup:
//! - [`PostgresStore`] - Default; lives next to the user table, expired rows
//!   are purged by [`spawn_expired_session_purge`]
//! - [`RedisSessionStore`] - Shared Redis, expiry handled by key TTLs
//! - [`MemoryStore`] - Process-local, for tests and single-process development
//!
//! Sessions expire after a period of inactivity: every request that carries
//! a live session saves it again, pushing its expiry forward.

mod redis_store;

pub use redis_store::RedisSessionStore;

use async_trait::async_trait;
use tower_sessions::cookie::SameSite;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

/// Name of the session id cookie.
pub const SESSION_COOKIE: &str = "jtrac_session";

/// The session store in use, selected from configuration at startup.
#[derive(Debug, Clone)]
pub enum SessionBackend {
    Postgres(PostgresStore),
    Redis(RedisSessionStore),
    Memory(MemoryStore),
}

impl SessionBackend {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Redis(_) => "redis",
            Self::Memory(_) => "memory",
        }
    }

    /// Checks that the store answers a lookup.
    pub async fn health_check(&self) -> bool {
        self.load(&Id::default()).await.is_ok()
    }
}

#[async_trait]
impl SessionStore for SessionBackend {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.create(record).await,
            Self::Redis(store) => store.create(record).await,
            Self::Memory(store) => store.create(record).await,
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.save(record).await,
            Self::Redis(store) => store.save(record).await,
            Self::Memory(store) => store.save(record).await,
        }
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        match self {
            Self::Postgres(store) => store.load(session_id).await,
            Self::Redis(store) => store.load(session_id).await,
            Self::Memory(store) => store.load(session_id).await,
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        match self {
            Self::Postgres(store) => store.delete(session_id).await,
            Self::Redis(store) => store.delete(session_id).await,
            Self::Memory(store) => store.delete(session_id).await,
        }
    }
}

/// Builds the session middleware.
///
/// # Cookie
///
/// `jtrac_session`, `Path=/`, `HttpOnly`, `SameSite=Lax`, plus `Secure`
/// when `secure` is set.
///
/// # Expiry
///
/// Sessions end after `idle_timeout` without a request. The session is
/// saved on every response so the deadline moves with each request.
pub fn session_layer<S>(
    store: S,
    idle_timeout: time::Duration,
    secure: bool,
) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(secure)
        .with_always_save(true)
        .with_expiry(Expiry::OnInactivity(idle_timeout))
}

/// Periodically deletes expired sessions from PostgreSQL.
///
/// Redis expires keys on its own; the PostgreSQL table would otherwise keep
/// every abandoned anonymous session.
pub fn spawn_expired_session_purge(store: PostgresStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match store.delete_expired().await {
                Ok(()) => tracing::debug!("Expired sessions purged"),
                Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
            }
        }
    })
}
