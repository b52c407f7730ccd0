//! The `jtrac` remember-me cookie.

use axum::http::{HeaderMap, header::COOKIE};
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::domain::remember_me::{REMEMBER_ME_MAX_AGE_SECS, RememberMeToken};

/// Name of the remember-me cookie.
pub const REMEMBER_ME_COOKIE: &str = "jtrac";

/// Values of every incoming cookie called `name`, in header order.
///
/// A browser may send several cookies with the same name (set for different
/// paths). `CookieJar` keeps only one per name, so the headers are split
/// here instead. Pairs that fail to parse are skipped.
pub fn cookie_values(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| Cookie::split_parse(header))
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .collect()
}

/// The persistent login cookie, valid for 30 days.
///
/// The value is written verbatim (`loginName:encodedPassword`).
pub fn remember_me_cookie(token: &RememberMeToken, secure: bool) -> Cookie<'static> {
    Cookie::build((REMEMBER_ME_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(REMEMBER_ME_MAX_AGE_SECS))
        .build()
}

/// A cookie telling the browser to drop the remember-me cookie.
pub fn expired_remember_me_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((REMEMBER_ME_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}
