//! Login page: remember-me auto login, credential form and submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderName, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::application::services::AuthError;
use crate::domain::credentials::Credentials;
use crate::domain::entities::User;
use crate::domain::remember_me::RememberMeToken;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies::{REMEMBER_ME_COOKIE, cookie_values, remember_me_cookie};
use crate::web::routes::{DASHBOARD_PATH, LOGIN_PATH};
use crate::web::session as web_session;

const LOGIN_NAME_FIELD: &str = "loginName";
const PASSWORD_FIELD: &str = "password";

/// Template for the login page.
///
/// Renders `templates/login.html` with the title, home link, credential
/// form, version label and feedback region.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    title: String,
    home_label: String,
    home_href: &'static str,
    action: &'static str,
    login_name_label: String,
    password_label: String,
    remember_me_label: String,
    submit_label: String,
    version: &'static str,
    login_name: String,
    remember_me: bool,
    error: Option<String>,
    /// Id of the input that receives focus once the page has loaded.
    focus_field: &'static str,
}

impl LoginTemplate {
    fn new(state: &AppState, credentials: Option<&Credentials>, error: Option<String>) -> Self {
        let messages = &state.localizer;
        let login_name = credentials
            .and_then(|c| c.login_name.clone())
            .unwrap_or_default();
        let focus_field = if login_name.is_empty() {
            LOGIN_NAME_FIELD
        } else {
            PASSWORD_FIELD
        };

        Self {
            title: messages.get("login.title"),
            home_label: messages.get("login.home"),
            home_href: LOGIN_PATH,
            action: LOGIN_PATH,
            login_name_label: messages.get("login.loginName"),
            password_label: messages.get("login.password"),
            remember_me_label: messages.get("login.rememberMe"),
            submit_label: messages.get("login.submit"),
            version: env!("CARGO_PKG_VERSION"),
            login_name,
            remember_me: credentials.is_some_and(|c| c.remember_me),
            error,
            focus_field,
        }
    }
}

/// Login form as posted by the browser.
///
/// Every field is optional at the binding level; missing values are
/// rejected by [`crate::application::services::AuthService::authenticate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub login_name: Option<String>,
    pub password: Option<String>,
    /// Checkbox: present (usually `on`) when ticked, absent otherwise.
    pub remember_me: Option<String>,
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        let remember_me = form
            .remember_me
            .is_some_and(|v| matches!(v.as_str(), "on" | "true" | "1"));
        Credentials::new(form.login_name, form.password, remember_me)
    }
}

/// Renders the login page, logging the client in silently when a valid
/// remember-me cookie is present.
///
/// # Endpoint
///
/// `GET /login`
///
/// # Remember-me
///
/// Each `jtrac` cookie is tried in order. A value without `:` is ignored,
/// as is a token naming an unknown user or carrying a stale password.
/// The first valid token establishes the session and redirects to the
/// dashboard without showing the form.
#[tracing::instrument(skip_all)]
pub async fn login_page_handler(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(user) = remember_me_login(&state, &headers).await {
        debug!(login_name = %user.login_name, "Remember-me login success, redirecting");
        metrics::counter!("jtrac_remember_me_logins_total").increment(1);
        web_session::log_in(&session, &user).await?;
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    Ok(LoginTemplate::new(&state, None, None).into_response())
}

async fn remember_me_login(state: &AppState, headers: &HeaderMap) -> Option<User> {
    for value in cookie_values(headers, REMEMBER_ME_COOKIE) {
        debug!("Found remember-me cookie");
        let Some(token) = RememberMeToken::parse(&value) else {
            debug!("Malformed remember-me cookie ignored");
            continue;
        };

        debug!(login_name = %token.login_name, "Valid cookie, attempting authentication");
        match state.auth_service.authenticate_remember_me(&token).await {
            Ok(user) => return Some(user),
            Err(AuthError::Repository(e)) => {
                warn!(error = %e, "Remember-me lookup failed");
            }
            Err(e) => {
                debug!(login_name = %token.login_name, reason = %e, "Remember-me login rejected");
            }
        }
    }
    None
}

/// Handles login form submission.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Outcomes
///
/// - **303 See Other** to the original destination (or the dashboard) on
///   success, with a `jtrac` cookie when "remember me" was ticked
/// - **200 OK** with the form and a generic error message on any
///   credential failure; the session is left untouched and no cookie is set
///
/// # Errors
///
/// Returns [`AppError::Internal`] when the user or session store fails.
#[tracing::instrument(skip_all, fields(login_name = tracing::field::Empty))]
pub async fn login_submit_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = Credentials::from(form);
    if let Some(login_name) = &credentials.login_name {
        tracing::Span::current().record("login_name", tracing::field::display(login_name));
    }

    let user = match state.auth_service.authenticate(&credentials).await {
        Ok(user) => user,
        Err(AuthError::Repository(e)) => return Err(e),
        Err(reason) => {
            debug!(%reason, "Login failed");
            metrics::counter!("jtrac_login_attempts_total", "outcome" => "failure").increment(1);
            let error = state.localizer.get("login.error");
            return Ok(LoginTemplate::new(&state, Some(&credentials), Some(error)).into_response());
        }
    };

    let mut cookies: Vec<(HeaderName, String)> = Vec::new();
    if credentials.remember_me {
        let token = state.auth_service.remember_me_token(&user);
        let cookie = remember_me_cookie(&token, state.cookie_secure);
        cookies.push((SET_COOKIE, cookie.to_string()));
        debug!("Remember me requested, cookie added");
    }

    let destination = web_session::log_in(&session, &user)
        .await?
        .unwrap_or_else(|| DASHBOARD_PATH.to_string());
    metrics::counter!("jtrac_login_attempts_total", "outcome" => "success").increment(1);
    debug!(%destination, "Login successful, redirecting");

    Ok((AppendHeaders(cookies), Redirect::to(&destination)).into_response())
}
