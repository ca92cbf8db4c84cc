//! HTML page handlers.

use std::collections::HashMap;

use axum::Form;
use axum::extract::{Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use salat_auth::AuthStatus;
use salat_core::error::ErrorKind;
use salat_service::LocationMode;

use crate::cookies::{with_session, without_session};
use crate::dto::request::{LocationQuery, LoginRequest, parse_offset_form, refresh_target};
use crate::error::ApiError;
use crate::extractors::{AuthUser, CurrentSession};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;
use crate::views::{dashboard_page, login_page};

/// GET /
///
/// The dashboard for a logged-in caller, the login form otherwise. An
/// unknown location mode falls back to manual input with a warning.
pub async fn index(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<LocationQuery>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let identity = match session.status {
        AuthStatus::Authenticated(identity) => identity,
        AuthStatus::Rejected | AuthStatus::Pending => {
            let header = state.dashboard.header().await;
            let footer = &state.dashboard.page().footer;
            return Html(login_page(&header, false, footer).into_string()).into_response();
        }
    };

    let (request, mode_warning) = match query.mode() {
        Ok(mode) => (query.with_mode(mode), None),
        Err(e) => (
            query.with_mode(LocationMode::Manual),
            Some(format!("{}. Using manual location.", e.message)),
        ),
    };
    let mut dashboard = state.dashboard.build(&identity, &request).await;
    if let Some(warning) = mode_warning {
        dashboard.location.warning.get_or_insert(warning);
    }

    let target = refresh_target(raw_query.as_deref());
    Html(dashboard_page(&dashboard, query.saved.is_some(), &target).into_string()).into_response()
}

/// POST /login
///
/// Sets the session cookie and returns to the dashboard. A failed attempt
/// re-renders the form with the rejection message.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Result<Response, ApiError> {
    match state.sessions.login(&req.username, &req.password).await {
        Ok(result) => {
            let jar = with_session(jar, &state, result.token.token);
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e) if e.kind == ErrorKind::Authentication => {
            let header = state.dashboard.header().await;
            let footer = &state.dashboard.page().footer;
            Ok((
                StatusCode::UNAUTHORIZED,
                Html(login_page(&header, true, footer).into_string()),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    if let Some(token) = session.token.as_deref() {
        state.sessions.logout(token).await?;
    }
    let jar = without_session(jar, &state);
    Ok((jar, Redirect::to("/")).into_response())
}

/// POST /admin/offsets
///
/// Applies every submitted offset in one batch, then returns to the
/// dashboard with a confirmation.
pub async fn update_offsets(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    require_admin(&auth)?;

    let updates = parse_offset_form(&form)?;
    state.offsets.apply(&auth.identity, &updates).await?;

    info!(username = %auth.identity.username, count = updates.len(), "Offsets saved from page");
    Ok(Redirect::to("/?saved=1"))
}
