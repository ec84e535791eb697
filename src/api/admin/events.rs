//! Event management admin endpoints

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::event::{Event, LeagueType};
use crate::infrastructure::services::{CreateEventRequest, UpdateEventRequest};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventApiRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub league_type: LeagueType,
    pub registration_deadline: DateTime<Utc>,
    pub tournament_end_time: DateTime<Utc>,
    #[serde(default)]
    pub max_vip_players: Option<u8>,
    #[serde(default)]
    pub max_players_from_single_team: Option<u8>,
    #[serde(default)]
    pub max_foreign_players: Option<u8>,
    #[serde(default)]
    pub max_replacements: Option<u8>,
}

/// Partial update; `max_foreign_players` distinguishes "leave alone"
/// (absent) from "clear the cap" (null)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateEventApiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub league_type: Option<LeagueType>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub tournament_end_time: Option<DateTime<Utc>>,
    pub max_vip_players: Option<u8>,
    pub max_players_from_single_team: Option<u8>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_foreign_players: Option<Option<u8>>,
    pub max_replacements: Option<u8>,
}

/// Absent field means "leave alone"; an explicit `null` means "clear"
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u8>::deserialize(deserializer).map(Some)
}

/// POST /admin/events
pub async fn create_event(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(request): Json<CreateEventApiRequest>,
) -> Result<Json<Event>, ApiError> {
    debug!(name = %request.name, "Admin creating event");

    let event = state
        .event_service
        .create(CreateEventRequest {
            name: request.name,
            description: request.description,
            league_type: request.league_type,
            registration_deadline: request.registration_deadline,
            tournament_end_time: request.tournament_end_time,
            max_vip_players: request.max_vip_players,
            max_players_from_single_team: request.max_players_from_single_team,
            max_foreign_players: request.max_foreign_players,
            max_replacements: request.max_replacements,
        })
        .await?;
    Ok(Json(event))
}

/// PUT /admin/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(event_id): Path<String>,
    Json(request): Json<UpdateEventApiRequest>,
) -> Result<Json<Event>, ApiError> {
    debug!(event_id = %event_id, "Admin updating event");

    let event = state
        .event_service
        .update(
            &event_id,
            UpdateEventRequest {
                name: request.name,
                description: request.description,
                league_type: request.league_type,
                registration_deadline: request.registration_deadline,
                tournament_end_time: request.tournament_end_time,
                max_vip_players: request.max_vip_players,
                max_players_from_single_team: request.max_players_from_single_team,
                max_foreign_players: request.max_foreign_players,
                max_replacements: request.max_replacements,
            },
        )
        .await?;
    Ok(Json(event))
}

/// DELETE /admin/events/{event_id}
///
/// Cascades: the event's rosters, players and teams go with it.
pub async fn delete_event(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(event_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    debug!(event_id = %event_id, "Admin deleting event");

    state.event_service.delete(&event_id).await?;
    Ok(Json(serde_json::json!({
        "deleted": true,
        "id": event_id
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_request_deserialization() {
        let json = r#"{
            "name": "Summer Cup",
            "league_type": "domestic",
            "registration_deadline": "2026-09-01T18:00:00Z",
            "tournament_end_time": "2026-10-01T18:00:00Z",
            "max_vip_players": 2
        }"#;

        let request: CreateEventApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Summer Cup");
        assert_eq!(request.max_vip_players, Some(2));
        assert!(request.max_foreign_players.is_none());
    }

    #[test]
    fn test_update_distinguishes_absent_from_null_foreign_cap() {
        let absent: UpdateEventApiRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.max_foreign_players, None);

        let cleared: UpdateEventApiRequest =
            serde_json::from_str(r#"{"max_foreign_players": null}"#).unwrap();
        assert_eq!(cleared.max_foreign_players, Some(None));

        let set: UpdateEventApiRequest =
            serde_json::from_str(r#"{"max_foreign_players": 4}"#).unwrap();
        assert_eq!(set.max_foreign_players, Some(Some(4)));
    }
}
