//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::AuthService;
use crate::domain::repositories::UserRepository;
use crate::infrastructure::session::SessionBackend;
use crate::web::messages::Localizer;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub sessions: SessionBackend,
    pub localizer: Arc<Localizer>,
    /// Adds the `Secure` attribute to every cookie the service sets.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService<dyn UserRepository>>,
        sessions: SessionBackend,
        localizer: Arc<Localizer>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            auth_service,
            sessions,
            localizer,
            cookie_secure,
        }
    }
}
