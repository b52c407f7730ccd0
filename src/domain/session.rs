//! Server-side session contents.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

/// The authenticated principal as stored in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub login_name: String,
    pub name: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login_name: user.login_name.clone(),
            name: user.name.clone(),
        }
    }
}

/// Everything kept for one client between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user: Option<SessionUser>,
    /// Path (and query) of the protected page that sent the client to the
    /// login page. Consumed by the first successful login.
    pub original_destination: Option<String>,
}

impl SessionData {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
