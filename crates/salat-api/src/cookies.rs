//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::state::AppState;

/// Adds the session cookie carrying `token`.
pub fn with_session(jar: CookieJar, state: &AppState, token: String) -> CookieJar {
    let settings = state.sessions.cookie();
    let cookie = Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.server.secure_cookies)
        .max_age(time::Duration::days(i64::from(settings.expiry_days)));
    jar.add(cookie)
}

/// Removes the session cookie.
pub fn without_session(jar: CookieJar, state: &AppState) -> CookieJar {
    let name = state.sessions.cookie().name.clone();
    jar.remove(Cookie::build((name, "")).path("/"))
}
