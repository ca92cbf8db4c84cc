//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use salat_auth::SessionManager;
use salat_cache::provider::CacheManager;
use salat_core::config::AppConfig;
use salat_service::{DashboardService, OffsetStore};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prayer timing snapshots and revoked sessions
    pub cache: Arc<CacheManager>,
    /// Login, token validation, logout
    pub sessions: Arc<SessionManager>,
    /// Page composition
    pub dashboard: Arc<DashboardService>,
    /// Shared Iqama and reminder offsets
    pub offsets: Arc<OffsetStore>,
    /// Login throttle, when enabled
    pub login_limiter: Option<RateLimiter>,
    /// Process start, for uptime
    pub started_at: Instant,
}
