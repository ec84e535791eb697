//! Event browsing endpoints: the tournament, its teams, players and
//! leaderboard

use axum::extract::{Path, State};
use chrono::Utc;
use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::event::{Event, EventPhase};
use crate::domain::player::Player;
use crate::domain::roster::StandingRow;
use crate::domain::team::CricketTeam;

/// Event with its derived phase
#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: Event,
    pub phase: EventPhase,
}

impl EventResponse {
    fn from_event(event: Event) -> Self {
        let phase = event.phase_at(Utc::now());
        Self { event, phase }
    }
}

/// GET /v1/events
pub async fn list_events(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<Vec<EventResponse>>, ApiError> {
    let events = state.event_service.list().await?;
    Ok(Json(
        events.into_iter().map(EventResponse::from_event).collect(),
    ))
}

/// GET /v1/events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state.event_service.get_required(&event_id).await?;
    Ok(Json(EventResponse::from_event(event)))
}

/// GET /v1/events/{event_id}/teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<CricketTeam>>, ApiError> {
    state.event_service.get_required(&event_id).await?;
    let teams = state.team_service.list_for_event(&event_id).await?;
    Ok(Json(teams))
}

/// GET /v1/events/{event_id}/players
pub async fn list_players(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<Player>>, ApiError> {
    state.event_service.get_required(&event_id).await?;
    let players = state.player_service.list_for_event(&event_id).await?;
    Ok(Json(players))
}

/// GET /v1/events/{event_id}/standings
pub async fn standings(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<StandingRow>>, ApiError> {
    let standings = state.standings_service.standings_for_event(&event_id).await?;
    Ok(Json(standings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::LeagueType;
    use chrono::Duration;

    #[test]
    fn test_event_response_carries_phase() {
        let now = Utc::now();
        let event = Event::new(
            "Cup",
            LeagueType::Domestic,
            now + Duration::days(1),
            now + Duration::days(10),
        )
        .unwrap();

        let response = EventResponse::from_event(event);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"phase\":\"upcoming\""));
        assert!(json.contains("\"name\":\"Cup\""));
    }
}
