//! JSON authentication endpoints.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use crate::cookies::{with_session, without_session};
use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, IdentityResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Returns the token for Bearer use and also sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    req.validate()?;

    let result = state.sessions.login(&req.username, &req.password).await?;
    let response = LoginResponse {
        token: result.token.token.clone(),
        expires_at: result.token.expires_at,
        user: IdentityResponse::from(&result.identity),
    };

    let jar = with_session(jar, &state, result.token.token);
    Ok((jar, Json(ApiResponse::ok(response))))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.sessions.logout(&auth.token).await?;
    Ok((
        without_session(jar, &state),
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(IdentityResponse::from(&auth.identity)))
}
