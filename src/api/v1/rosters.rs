//! Roster endpoints: building, editing and browsing participant teams

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::roster::{LineupReport, Roster};
use crate::infrastructure::services::{SaveRosterRequest, SlotSelection};

/// One slot of the submitted lineup; `null` entries are still-empty slots
#[derive(Debug, Clone, Deserialize)]
pub struct SlotApiRequest {
    pub player_id: String,
    #[serde(default)]
    pub vip: bool,
}

/// Create/edit/validate body
#[derive(Debug, Deserialize)]
pub struct SaveRosterApiRequest {
    pub team_name: String,
    pub slots: Vec<Option<SlotApiRequest>>,
}

impl SaveRosterApiRequest {
    fn into_service_request(self, event_id: String) -> SaveRosterRequest {
        SaveRosterRequest {
            event_id,
            team_name: self.team_name,
            slots: self
                .slots
                .into_iter()
                .map(|slot| {
                    slot.map(|s| SlotSelection {
                        player_id: s.player_id,
                        vip: s.vip,
                    })
                })
                .collect(),
        }
    }
}

/// The caller's roster with its live score and rank
#[derive(Debug, Serialize)]
pub struct MyRosterResponse {
    #[serde(flatten)]
    pub roster: Roster,
    pub total_points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

/// GET /v1/events/{event_id}/roster
pub async fn my_roster(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<MyRosterResponse>, ApiError> {
    let roster = state
        .roster_service
        .get_mine(user.id(), &event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("You have no team in this event"))?;

    let (total_points, rank) = state.standings_service.roster_summary(&roster).await?;
    Ok(Json(MyRosterResponse {
        roster,
        total_points,
        rank,
    }))
}

/// POST /v1/events/{event_id}/roster
pub async fn create_roster(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(event_id): Path<String>,
    Json(request): Json<SaveRosterApiRequest>,
) -> Result<Json<Roster>, ApiError> {
    debug!(event_id = %event_id, user_id = %user.id(), "Submitting roster");

    let roster = state
        .roster_service
        .create(&user, request.into_service_request(event_id))
        .await?;
    Ok(Json(roster))
}

/// PUT /v1/events/{event_id}/roster
pub async fn update_roster(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(event_id): Path<String>,
    Json(request): Json<SaveRosterApiRequest>,
) -> Result<Json<Roster>, ApiError> {
    debug!(event_id = %event_id, user_id = %user.id(), "Editing roster");

    let roster = state
        .roster_service
        .update_mine(&user, request.into_service_request(event_id))
        .await?;
    Ok(Json(roster))
}

/// POST /v1/events/{event_id}/roster/validate
///
/// Dry-run the full ruleset against a prospective lineup; the report lists
/// every check so the client can show all violations at once.
pub async fn validate_roster(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(event_id): Path<String>,
    Json(request): Json<SaveRosterApiRequest>,
) -> Result<Json<LineupReport>, ApiError> {
    let report = state
        .roster_service
        .validate(&request.into_service_request(event_id))
        .await?;
    Ok(Json(report))
}

/// GET /v1/events/{event_id}/rosters
pub async fn list_rosters(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Roster>>, ApiError> {
    let rosters = state.roster_service.list_for_event(&user, &event_id).await?;
    Ok(Json(rosters))
}
