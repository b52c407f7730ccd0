//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::IntoResponse};

use crate::domain::session::SessionUser;
use crate::state::AppState;
use crate::web::routes::LOGOUT_PATH;

/// Template for the dashboard, the default landing page after login.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    title: String,
    welcome: String,
    name: String,
    login_name: String,
    logout_label: String,
    logout_href: &'static str,
    version: &'static str,
}

/// Renders the dashboard for the logged-in user.
///
/// # Endpoint
///
/// `GET /`
///
/// # Authentication
///
/// Mounted behind [`crate::web::middleware::web_auth`], which places the
/// [`SessionUser`] in the request extensions.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> impl IntoResponse {
    let messages = &state.localizer;
    DashboardTemplate {
        title: messages.get("dashboard.title"),
        welcome: messages.get("dashboard.welcome"),
        name: user.name,
        login_name: user.login_name,
        logout_label: messages.get("logout"),
        logout_href: LOGOUT_PATH,
        version: env!("CARGO_PKG_VERSION"),
    }
}
