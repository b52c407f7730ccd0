//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, login_page_handler, login_submit_handler, logout_handler,
};
use crate::web::middleware::web_auth;
use axum::{Router, middleware, routing::get};

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
/// Default landing page after login.
pub const DASHBOARD_PATH: &str = "/";

/// Routes requiring an authenticated session.
///
/// Protected via [`crate::web::middleware::web_auth`], which needs the
/// session layer applied around the router.
///
/// # Endpoints
///
/// - `GET /` - Dashboard
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(DASHBOARD_PATH, get(dashboard_handler))
        .route_layer(middleware::from_fn(web_auth::layer))
}

/// Public routes.
///
/// # Endpoints
///
/// - `GET /login` - Login page (with remember-me auto login)
/// - `POST /login` - Login form submission
/// - `GET /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page_handler).post(login_submit_handler))
        .route(LOGOUT_PATH, get(logout_handler))
}
