//! Route definitions.
//!
//! HTML page routes live at the root; the JSON API is mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware::rate_limit::login_rate_limit;
use crate::state::AppState;

/// Build the router with all routes. Cross-cutting layers are added by
/// [`crate::app::build_app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(dashboard_routes())
        .merge(offset_routes())
        .merge(health_routes());

    Router::new()
        .merge(page_routes(&state))
        .nest("/api", api_routes)
        .with_state(state)
}

/// Dashboard page, login form, logout, and the admin offset form
fn page_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::page::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ))
        .route("/", get(handlers::page::index))
        .route("/logout", post(handlers::page::logout))
        .route("/admin/offsets", post(handlers::page::update_offsets))
}

/// Auth endpoints: login (rate limited), logout, me
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Dashboard data for client polling
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard::dashboard))
}

/// Offset configuration
fn offset_routes() -> Router<AppState> {
    Router::new().route(
        "/offsets",
        get(handlers::offsets::get_offsets).put(handlers::offsets::update_offsets),
    )
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
