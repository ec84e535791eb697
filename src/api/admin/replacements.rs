//! Replacement review admin endpoints

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::replacement::ReplacementRequest;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AcceptApiRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectApiRequest {
    pub reason: String,
}

/// GET /admin/replacements/pending
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<ReplacementRequest>>, ApiError> {
    let requests = state.replacement_service.list_pending().await?;
    Ok(Json(requests))
}

/// POST /admin/replacements/{request_id}/accept
pub async fn accept(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(request_id): Path<String>,
    Json(request): Json<AcceptApiRequest>,
) -> Result<Json<ReplacementRequest>, ApiError> {
    debug!(request_id = %request_id, "Admin accepting replacement");

    let replacement = state
        .replacement_service
        .accept(&request_id, request.reason)
        .await?;
    Ok(Json(replacement))
}

/// POST /admin/replacements/{request_id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(request_id): Path<String>,
    Json(request): Json<RejectApiRequest>,
) -> Result<Json<ReplacementRequest>, ApiError> {
    debug!(request_id = %request_id, "Admin rejecting replacement");

    let replacement = state
        .replacement_service
        .reject(&request_id, request.reason)
        .await?;
    Ok(Json(replacement))
}
