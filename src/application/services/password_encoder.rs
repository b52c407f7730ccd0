//! One-way password encoding.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Deterministic one-way password encoder.
///
/// Passwords are encoded with HMAC-SHA256 keyed by the server secret
/// (`PASSWORD_ENCODER_SECRET`). The same function produces the stored form
/// and the form compared at login, so changing the secret invalidates every
/// stored password and every remember-me cookie.
#[derive(Clone)]
pub struct PasswordEncoder {
    secret: String,
}

impl PasswordEncoder {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns the 64-character lowercase hex encoding of `clear_text`.
    pub fn encode(&self, clear_text: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(clear_text.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
