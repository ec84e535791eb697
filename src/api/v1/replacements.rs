//! Replacement request endpoints for participants

use axum::extract::{Path, State};
use serde::Deserialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::replacement::ReplacementRequest;
use crate::infrastructure::services::SubmitReplacementRequest;

#[derive(Debug, Deserialize)]
pub struct SubmitReplacementApiRequest {
    pub roster_id: String,
    pub outgoing_player_id: String,
    pub incoming_player_id: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// POST /v1/replacements
pub async fn submit(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<SubmitReplacementApiRequest>,
) -> Result<Json<ReplacementRequest>, ApiError> {
    let replacement = state
        .replacement_service
        .submit(
            &user,
            SubmitReplacementRequest {
                roster_id: request.roster_id,
                outgoing_player_id: request.outgoing_player_id,
                incoming_player_id: request.incoming_player_id,
                note: request.note,
            },
        )
        .await?;
    Ok(Json(replacement))
}

/// GET /v1/rosters/{roster_id}/replacements
///
/// A participant sees only their own roster's requests; administrators see
/// any roster's.
pub async fn list_for_roster(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(roster_id): Path<String>,
) -> Result<Json<Vec<ReplacementRequest>>, ApiError> {
    let roster = state.roster_service.get_required(&roster_id).await?;
    if !user.is_admin() && roster.participant_id() != user.id() {
        return Err(ApiError::forbidden("This is not your roster"));
    }

    let requests = state
        .replacement_service
        .list_for_roster(&roster_id)
        .await?;
    Ok(Json(requests))
}
