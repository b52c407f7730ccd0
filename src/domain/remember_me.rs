//! Persistent login token carried by the remember-me cookie.

use std::fmt;

/// Token lifetime: 30 days, in seconds.
pub const REMEMBER_ME_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// `loginName:encodedPassword`, split on the first `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberMeToken {
    pub login_name: String,
    pub encoded_password: String,
}

impl RememberMeToken {
    pub fn new(login_name: impl Into<String>, encoded_password: impl Into<String>) -> Self {
        Self {
            login_name: login_name.into(),
            encoded_password: encoded_password.into(),
        }
    }

    /// Parses a cookie value. Returns `None` when the separator is missing.
    pub fn parse(value: &str) -> Option<Self> {
        let (login_name, encoded_password) = value.split_once(':')?;
        Some(Self::new(login_name, encoded_password))
    }
}

impl fmt::Display for RememberMeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.login_name, self.encoded_password)
    }
}
