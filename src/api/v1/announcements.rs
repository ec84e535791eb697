//! Announcement listing endpoints

use axum::extract::State;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::announcement::Announcement;

/// GET /v1/announcements
pub async fn list(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let announcements = state.announcement_service.list().await?;
    Ok(Json(announcements))
}

/// GET /v1/announcements/public
///
/// No session required; only announcements addressed to everyone.
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let announcements = state.announcement_service.list_public().await?;
    Ok(Json(announcements))
}
