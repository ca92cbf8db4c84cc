//! Session extractors.
//!
//! The session token is read from `Authorization: Bearer <token>` first,
//! then from the session cookie named in the credential file.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use salat_auth::{AuthStatus, Identity};
use salat_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Pulls the raw session token out of a request.
fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Authentication status of the request; never rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Authenticated or pending.
    pub status: AuthStatus,
    /// Raw token, if one was presented.
    pub token: Option<String>,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.sessions.cookie().name);
        let status = state.sessions.authenticate(token.as_deref()).await;
        Ok(Self { status, token })
    }
}

/// An authenticated caller; rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Who is calling.
    pub identity: Identity,
    /// The token that authenticated the call.
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.sessions.cookie().name)
            .ok_or_else(|| AppError::authentication("Not logged in"))?;
        let (identity, _claims) = state.sessions.validate(&token).await?;
        Ok(Self { identity, token })
    }
}
