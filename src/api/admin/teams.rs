//! Real-world team management admin endpoints

use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::team::CricketTeam;
use crate::infrastructure::services::{CreateTeamRequest, UpdateTeamRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub event_id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamApiRequest {
    pub name: Option<String>,
    pub short_name: Option<String>,
}

/// POST /admin/teams
pub async fn create_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<Json<CricketTeam>, ApiError> {
    debug!(event_id = %request.event_id, name = %request.name, "Admin creating team");

    let team = state
        .team_service
        .create(CreateTeamRequest {
            event_id: request.event_id,
            name: request.name,
            short_name: request.short_name,
        })
        .await?;
    Ok(Json(team))
}

/// PUT /admin/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Json<CricketTeam>, ApiError> {
    debug!(team_id = %team_id, "Admin updating team");

    let team = state
        .team_service
        .update(
            &team_id,
            UpdateTeamRequest {
                name: request.name,
                short_name: request.short_name,
            },
        )
        .await?;
    Ok(Json(team))
}

/// DELETE /admin/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(team_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(team_id = %team_id, "Admin deleting team");

    state.team_service.delete(&team_id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": team_id
    })))
}
