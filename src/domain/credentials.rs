//! Credentials submitted through the login form.

use std::fmt;

/// Login form input, scoped to a single request.
///
/// Browsers submit empty inputs as empty strings; those are normalized to
/// `None` so that an empty password is treated exactly like a missing one.
#[derive(Clone, Default)]
pub struct Credentials {
    pub login_name: Option<String>,
    pub password: Option<String>,
    pub remember_me: bool,
}

impl Credentials {
    pub fn new(login_name: Option<String>, password: Option<String>, remember_me: bool) -> Self {
        Self {
            login_name: login_name.filter(|s| !s.is_empty()),
            password: password.filter(|s| !s.is_empty()),
            remember_me,
        }
    }

    /// Returns both parts when present.
    pub fn complete(&self) -> Option<(&str, &str)> {
        match (&self.login_name, &self.password) {
            (Some(login_name), Some(password)) => Some((login_name.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login_name", &self.login_name)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("remember_me", &self.remember_me)
            .finish()
    }
}
