//! Health check endpoint.

use axum::Json;
use axum::extract::State;

use salat_core::traits::cache::CacheProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = match state.cache.health_check().await {
        Ok(true) => "ok",
        Ok(false) | Err(_) => "degraded",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cache: cache.to_string(),
    })
}
