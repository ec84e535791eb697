//! Event service - tournament lifecycle and cascading cleanup

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::event::{Event, EventId, LeagueType};
use crate::domain::player::Player;
use crate::domain::roster::Roster;
use crate::domain::storage::Storage;
use crate::domain::team::CricketTeam;
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// Request to create an event
#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: Option<String>,
    pub league_type: LeagueType,
    pub registration_deadline: DateTime<Utc>,
    pub tournament_end_time: DateTime<Utc>,
    pub max_vip_players: Option<u8>,
    pub max_players_from_single_team: Option<u8>,
    pub max_foreign_players: Option<u8>,
    pub max_replacements: Option<u8>,
}

/// Request to update an event (administrator edit)
#[derive(Debug, Clone, Default)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub league_type: Option<LeagueType>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub tournament_end_time: Option<DateTime<Utc>>,
    pub max_vip_players: Option<u8>,
    pub max_players_from_single_team: Option<u8>,
    pub max_foreign_players: Option<Option<u8>>,
    pub max_replacements: Option<u8>,
}

#[derive(Debug)]
pub struct EventService {
    events: Arc<dyn Storage<Event>>,
    teams: Arc<dyn Storage<CricketTeam>>,
    players: Arc<dyn Storage<Player>>,
    rosters: Arc<dyn Storage<Roster>>,
    feed: Arc<ChangeFeed>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn Storage<Event>>,
        teams: Arc<dyn Storage<CricketTeam>>,
        players: Arc<dyn Storage<Player>>,
        rosters: Arc<dyn Storage<Roster>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            events,
            teams,
            players,
            rosters,
            feed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Event>, DomainError> {
        self.events.get(&EventId::from_string(id)).await
    }

    pub async fn get_required(&self, id: &str) -> Result<Event, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Event '{}' not found", id)))
    }

    /// All events, most recent registration deadline first
    pub async fn list(&self) -> Result<Vec<Event>, DomainError> {
        let mut events = self.events.list().await?;
        events.sort_by(|a, b| b.registration_deadline().cmp(&a.registration_deadline()));
        Ok(events)
    }

    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, DomainError> {
        let mut event = Event::new(
            request.name,
            request.league_type,
            request.registration_deadline,
            request.tournament_end_time,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(description) = request.description {
            event = event.with_description(description);
        }
        if let Some(max) = request.max_vip_players {
            event = event
                .with_max_vip_players(max)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(max) = request.max_players_from_single_team {
            event = event.with_max_players_from_single_team(max);
        }
        if request.max_foreign_players.is_some() {
            event = event.with_max_foreign_players(request.max_foreign_players);
        }
        if let Some(max) = request.max_replacements {
            event = event.with_max_replacements(max);
        }

        let event = self.events.create(event).await?;
        self.feed.publish(Collection::Events);
        Ok(event)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateEventRequest,
    ) -> Result<Event, DomainError> {
        let mut event = self.get_required(id).await?;

        if let Some(name) = request.name {
            event
                .set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(description) = request.description {
            event.set_description(Some(description));
        }
        if let Some(league_type) = request.league_type {
            event.set_league_type(league_type);
        }
        if request.registration_deadline.is_some() || request.tournament_end_time.is_some() {
            let deadline = request
                .registration_deadline
                .unwrap_or_else(|| event.registration_deadline());
            let end = request
                .tournament_end_time
                .unwrap_or_else(|| event.tournament_end_time());
            event
                .set_window(deadline, end)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(max) = request.max_vip_players {
            event
                .set_max_vip_players(max)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        if let Some(max) = request.max_players_from_single_team {
            event.set_max_players_from_single_team(max);
        }
        if let Some(max) = request.max_foreign_players {
            event.set_max_foreign_players(max);
        }
        if let Some(max) = request.max_replacements {
            event.set_max_replacements(max);
        }

        let event = self.events.update(event).await?;
        self.feed.publish(Collection::Events);
        Ok(event)
    }

    /// Delete an event and everything that hangs off it: rosters first,
    /// then players, then teams, then the event itself
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let event = self.get_required(id).await?;
        let event_id = event.id().clone();

        info!(event_id = %event_id, "Deleting event and related data");

        for roster in self.rosters.list().await? {
            if roster.event_id() == &event_id {
                self.rosters.delete(roster.id()).await?;
            }
        }
        for player in self.players.list().await? {
            if player.event_id() == &event_id {
                self.players.delete(player.id()).await?;
            }
        }
        for team in self.teams.list().await? {
            if team.event_id() == &event_id {
                self.teams.delete(team.id()).await?;
            }
        }
        self.events.delete(&event_id).await?;

        self.feed.publish(Collection::Rosters);
        self.feed.publish(Collection::Players);
        self.feed.publish(Collection::Teams);
        self.feed.publish(Collection::Events);
        Ok(())
    }
}
