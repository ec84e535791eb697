//! Season history admin endpoints

use axum::extract::{Path, State};
use serde::Deserialize;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::history::SeasonRecord;
use crate::infrastructure::services::SeasonRecordRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRecordApiRequest {
    pub season_number: u32,
    pub event_name: String,
    pub champion_name: String,
    pub champion_team_name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SeasonRecordApiRequest {
    fn into_service_request(self) -> SeasonRecordRequest {
        SeasonRecordRequest {
            season_number: self.season_number,
            event_name: self.event_name,
            champion_name: self.champion_name,
            champion_team_name: self.champion_team_name,
            notes: self.notes,
        }
    }
}

/// POST /admin/history
pub async fn add_record(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<SeasonRecordApiRequest>,
) -> Result<Json<SeasonRecord>, ApiError> {
    let record = state
        .history_service
        .add(request.into_service_request())
        .await?;
    Ok(Json(record))
}

/// PUT /admin/history/{record_id}
pub async fn update_record(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(record_id): Path<String>,
    Json(request): Json<SeasonRecordApiRequest>,
) -> Result<Json<SeasonRecord>, ApiError> {
    let record = state
        .history_service
        .update(&record_id, request.into_service_request())
        .await?;
    Ok(Json(record))
}

/// DELETE /admin/history/{record_id}
pub async fn delete_record(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(record_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.history_service.delete(&record_id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": record_id
    })))
}
