//! Announcement admin endpoints

use axum::extract::{Path, State};
use serde::Deserialize;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::announcement::{Announcement, AnnouncementScope};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementApiRequest {
    #[serde(default)]
    pub scope: AnnouncementScope,
    pub message: String,
}

/// POST /admin/announcements
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<CreateAnnouncementApiRequest>,
) -> Result<Json<Announcement>, ApiError> {
    let announcement = state
        .announcement_service
        .create(request.scope, request.message)
        .await?;
    Ok(Json(announcement))
}

/// DELETE /admin/announcements/{announcement_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(announcement_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.announcement_service.delete(&announcement_id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": announcement_id
    })))
}
