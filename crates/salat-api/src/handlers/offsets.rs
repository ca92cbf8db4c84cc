//! Offset configuration endpoints.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use salat_service::OffsetSnapshot;

use crate::dto::request::UpdateOffsetsRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/offsets
pub async fn get_offsets(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<ApiResponse<OffsetSnapshot>> {
    Json(ApiResponse::ok(state.offsets.snapshot().await))
}

/// PUT /api/offsets (admin only)
pub async fn update_offsets(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateOffsetsRequest>,
) -> Result<Json<ApiResponse<OffsetSnapshot>>, ApiError> {
    require_admin(&auth)?;
    req.validate()?;

    let snapshot = state.offsets.apply(&auth.identity, &req.updates).await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}
