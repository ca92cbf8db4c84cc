//! Application builder: wires services into `AppState` and layers the router.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use salat_auth::{CredentialStore, SessionManager};
use salat_cache::provider::CacheManager;
use salat_core::config::AppConfig;
use salat_core::error::AppError;
use salat_core::traits::Clock;
use salat_service::upstream::build_http_client;
use salat_service::{
    AladhanClient, DashboardService, IslamicDateService, LocationResolver, NominatimGeocoder,
    OffsetStore, PrayerTimeService,
};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::rate_limit::RateLimiter;
use crate::router::build_router;
use crate::state::AppState;

/// Forms and JSON bodies are tiny.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds every service from configuration and a loaded credential store.
pub fn build_state(
    config: AppConfig,
    credentials: CredentialStore,
    clock: Arc<dyn Clock>,
) -> Result<AppState, AppError> {
    let cache = Arc::new(CacheManager::new(&config.cache));

    let sessions = Arc::new(SessionManager::new(
        Arc::new(credentials),
        cache.clone(),
        config.auth.clone(),
    ));

    let http = build_http_client(&config.upstream)?;
    let aladhan = Arc::new(AladhanClient::new(http.clone(), &config.upstream));
    let geocoder = Arc::new(NominatimGeocoder::new(http, &config.upstream));

    let offsets = Arc::new(OffsetStore::new(&config.offsets)?);
    let dashboard = Arc::new(DashboardService::new(
        Arc::new(LocationResolver::new(geocoder, &config.location)?),
        Arc::new(PrayerTimeService::new(
            aladhan.clone(),
            cache.clone(),
            clock.clone(),
            &config.cache,
        )),
        Arc::new(IslamicDateService::new(aladhan, clock)),
        offsets.clone(),
        config.page.clone(),
    ));

    let login_limiter = match config.auth.login_rate_limit {
        0 => None,
        per_minute => {
            info!(
                per_minute,
                trust_forwarded_for = config.auth.trust_forwarded_for,
                "Login rate limiting enabled"
            );
            Some(
                RateLimiter::per_minute(per_minute)
                    .trust_forwarded_for(config.auth.trust_forwarded_for),
            )
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        cache,
        sessions,
        dashboard,
        offsets,
        login_limiter,
        started_at: Instant::now(),
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}
