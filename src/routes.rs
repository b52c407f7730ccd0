//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Dashboard (session required)
//! - `GET  /login`   - Login page (public, rate limited)
//! - `POST /login`   - Login submission (public, rate limited)
//! - `GET  /logout`  - Logout (public, rate limited)
//! - `GET  /health`  - Health check (public)
//! - `/static/*`     - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Sessions** - `jtrac_session` cookie and server-side session store
//! - **Rate limiting** - Per-IP token bucket on the login routes
//! - **Access control** - Session check on protected pages
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::infrastructure::session::SessionBackend;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_sessions::SessionManagerLayer;

/// Constructs the application router with all routes and middleware.
pub fn app_router(
    state: AppState,
    sessions: SessionManagerLayer<SessionBackend>,
) -> NormalizePath<Router> {
    let web_protected = web::routes::protected_routes();

    let web_public = web::routes::public_routes().layer(rate_limit::login_layer());

    let router = Router::new()
        .merge(web_protected)
        .merge(web_public)
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(sessions)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
