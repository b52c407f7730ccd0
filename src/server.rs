//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, session store selection and the
//! Axum server lifecycle.

use crate::application::services::{AuthService, PasswordEncoder};
use crate::config::Config;
use crate::domain::repositories::UserRepository;
use crate::infrastructure::persistence::PgUserRepository;
use crate::infrastructure::session::{
    RedisSessionStore, SessionBackend, session_layer, spawn_expired_session_purge,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::messages::Localizer;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_sessions_sqlx_store::PostgresStore;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Session store: Redis when configured and reachable, PostgreSQL otherwise
/// - UI messages
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The messages file cannot be read
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let sessions = build_session_store(&config, &pool).await?;
    let idle_timeout =
        time::Duration::seconds(i64::try_from(config.session_ttl_seconds).unwrap_or(i64::MAX));
    let sessions_layer = session_layer(sessions.clone(), idle_timeout, config.cookie_secure);

    let localizer = match &config.messages_path {
        Some(path) => Localizer::load(path)
            .with_context(|| format!("Failed to read messages from {}", path))?,
        None => Localizer::default(),
    };

    let repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let auth_service = Arc::new(AuthService::new(
        repository,
        PasswordEncoder::new(config.password_encoder_secret.clone()),
    ));

    let state = AppState::new(
        auth_service,
        sessions,
        Arc::new(localizer),
        config.cookie_secure,
    );

    let app = app_router(state, sessions_layer);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Picks Redis when configured and reachable, otherwise stores sessions in
/// PostgreSQL and starts the expired-session purge.
async fn build_session_store(config: &Config, pool: &sqlx::PgPool) -> Result<SessionBackend> {
    if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Sessions enabled (Redis)");
                return Ok(SessionBackend::Redis(redis));
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using PostgreSQL sessions.", e);
            }
        }
    }

    let store = PostgresStore::new(pool.clone());
    store
        .migrate()
        .await
        .context("Failed to migrate session table")?;
    spawn_expired_session_purge(store.clone(), SESSION_PURGE_INTERVAL);
    tracing::info!("Sessions enabled (PostgreSQL)");

    Ok(SessionBackend::Postgres(store))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
