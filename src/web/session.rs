//! Typed access to the login state kept in the `tower-sessions` session.

use tower_sessions::Session;

use crate::domain::entities::User;
use crate::domain::session::{SessionData, SessionUser};
use crate::error::AppError;

const SESSION_DATA_KEY: &str = "jtrac";

/// Reads the session contents; a fresh session yields the default.
pub async fn load(session: &Session) -> Result<SessionData, AppError> {
    Ok(session
        .get::<SessionData>(SESSION_DATA_KEY)
        .await?
        .unwrap_or_default())
}

async fn store(session: &Session, data: &SessionData) -> Result<(), AppError> {
    session.insert(SESSION_DATA_KEY, data).await?;
    Ok(())
}

/// Marks the session as authenticated by `user`.
///
/// The session id is cycled so an id issued before login cannot be reused
/// afterwards. Returns the original destination recorded before the login,
/// removing it from the session.
pub async fn log_in(session: &Session, user: &User) -> Result<Option<String>, AppError> {
    let mut data = load(session).await?;
    session.cycle_id().await?;

    let destination = data.original_destination.take();
    data.user = Some(SessionUser::from(user));
    store(session, &data).await?;

    tracing::debug!(login_name = %user.login_name, "Session authenticated");
    Ok(destination)
}

/// Remembers where the client wanted to go before being sent to log in.
pub async fn record_original_destination(
    session: &Session,
    destination: String,
) -> Result<(), AppError> {
    let mut data = load(session).await?;
    data.original_destination = Some(destination);
    store(session, &data).await
}

/// Drops the session; the middleware then expires its cookie.
pub async fn log_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}
