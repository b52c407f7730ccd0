//! Session-based access control for protected pages.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use tower_sessions::Session;

use crate::error::AppError;
use crate::web::routes::LOGIN_PATH;
use crate::web::session as web_session;

/// Lets authenticated sessions through and sends everyone else to log in.
///
/// # Authentication Flow
///
/// 1. Load the session referenced by the `jtrac_session` cookie (the
///    session layer must wrap this middleware)
/// 2. If it holds a user, insert the [`crate::domain::session::SessionUser`]
///    into the request extensions and continue to the handler
/// 3. Otherwise record the requested path (for `GET` requests) as the
///    original destination and redirect to `/login`
///
/// The login page sends the client back to the recorded destination after
/// a successful form login.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::web::middleware::web_auth;
///
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(user) = web_session::load(&session).await?.user {
        req.extensions_mut().insert(user);
        return Ok(next.run(req).await);
    }

    if req.method() == Method::GET {
        let destination = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());
        tracing::debug!(%destination, "Unauthenticated request, recording original destination");
        web_session::record_original_destination(&session, destination).await?;
    }

    Ok(Redirect::to(LOGIN_PATH).into_response())
}
