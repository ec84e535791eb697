//! Roster adjustments reserved for the administrator

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::roster::Roster;

#[derive(Debug, Clone, Deserialize)]
pub struct SetArchivedPointsApiRequest {
    pub points: i64,
}

/// PUT /admin/rosters/{roster_id}/archived-points
///
/// Carries banked points across a scoring-data reset.
pub async fn set_archived_points(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(roster_id): Path<String>,
    Json(request): Json<SetArchivedPointsApiRequest>,
) -> Result<Json<Roster>, ApiError> {
    debug!(roster_id = %roster_id, points = request.points, "Admin setting archived points");

    let roster = state
        .roster_service
        .set_archived_points(&roster_id, request.points)
        .await?;
    Ok(Json(roster))
}
