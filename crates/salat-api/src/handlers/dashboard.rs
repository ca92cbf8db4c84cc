//! JSON dashboard endpoint for client polling.

use axum::Json;
use axum::extract::{Query, State};

use salat_service::Dashboard;

use crate::dto::request::LocationQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard
///
/// Same content as the page. Upstream failures show up inside the body,
/// never as an error status.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let request = query.to_request()?;
    let dashboard = state.dashboard.build(&auth.identity, &request).await;
    Ok(Json(ApiResponse::ok(dashboard)))
}
