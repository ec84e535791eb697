//! Player pool management and score entry admin endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::player::{Nationality, Player, PlayerCategory};
use crate::infrastructure::services::{CreatePlayerRequest, UpdatePlayerRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerApiRequest {
    pub event_id: String,
    pub team_id: String,
    pub name: String,
    pub category: PlayerCategory,
    pub nationality: Nationality,
}

impl CreatePlayerApiRequest {
    fn into_service_request(self) -> CreatePlayerRequest {
        CreatePlayerRequest {
            event_id: self.event_id,
            team_id: self.team_id,
            name: self.name,
            category: self.category,
            nationality: self.nationality,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlayerApiRequest {
    pub name: Option<String>,
    pub category: Option<PlayerCategory>,
    pub nationality: Option<Nationality>,
    pub team_id: Option<String>,
}

/// Score entry: the full per-period sequence; `null` entries are periods
/// the player did not feature in
#[derive(Debug, Clone, Deserialize)]
pub struct SetPointsApiRequest {
    pub points: Vec<Option<i64>>,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateResponse {
    pub players: Vec<Player>,
    pub total: usize,
}

/// POST /admin/players
pub async fn create_player(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<CreatePlayerApiRequest>,
) -> Result<Json<Player>, ApiError> {
    debug!(name = %request.name, "Admin creating player");

    let player = state
        .player_service
        .create(request.into_service_request())
        .await?;
    Ok(Json(player))
}

/// POST /admin/players/bulk
///
/// Imports a whole squad at once; every player starts with an empty points
/// sequence.
pub async fn create_players_bulk(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(requests): Json<Vec<CreatePlayerApiRequest>>,
) -> Result<Json<BulkCreateResponse>, ApiError> {
    debug!(count = requests.len(), "Admin bulk-importing players");

    let players = state
        .player_service
        .create_bulk(
            requests
                .into_iter()
                .map(CreatePlayerApiRequest::into_service_request)
                .collect(),
        )
        .await?;

    let total = players.len();
    Ok(Json(BulkCreateResponse { players, total }))
}

/// PUT /admin/players/{player_id}
pub async fn update_player(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(player_id): Path<String>,
    Json(request): Json<UpdatePlayerApiRequest>,
) -> Result<Json<Player>, ApiError> {
    debug!(player_id = %player_id, "Admin updating player");

    let player = state
        .player_service
        .update(
            &player_id,
            UpdatePlayerRequest {
                name: request.name,
                category: request.category,
                nationality: request.nationality,
                team_id: request.team_id,
            },
        )
        .await?;
    Ok(Json(player))
}

/// PUT /admin/players/{player_id}/points
pub async fn set_points(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(player_id): Path<String>,
    Json(request): Json<SetPointsApiRequest>,
) -> Result<Json<Player>, ApiError> {
    debug!(player_id = %player_id, periods = request.points.len(), "Admin entering scores");

    let player = state
        .player_service
        .set_points(&player_id, request.points)
        .await?;
    Ok(Json(player))
}

/// DELETE /admin/players/{player_id}
pub async fn delete_player(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(player_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(player_id = %player_id, "Admin deleting player");

    state.player_service.delete(&player_id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": player_id
    })))
}
