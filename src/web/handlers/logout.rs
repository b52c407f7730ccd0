//! Logout handler.

use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::web::cookies::expired_remember_me_cookie;
use crate::web::routes::LOGIN_PATH;
use crate::web::session as web_session;

/// Ends the session and forgets the remember-me token.
///
/// # Endpoint
///
/// `GET /logout`
///
/// Always redirects to the login page, whether or not a session existed.
pub async fn logout_handler(session: Session) -> Result<Response, AppError> {
    if let Some(user) = web_session::load(&session).await?.user {
        tracing::debug!(login_name = %user.login_name, "Logging out");
    }

    web_session::log_out(&session).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, expired_remember_me_cookie().to_string())]),
        Redirect::to(LOGIN_PATH),
    )
        .into_response())
}
