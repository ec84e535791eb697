//! Player service - roster pool management and score entry

use std::sync::Arc;

use tracing::debug;

use crate::domain::event::EventId;
use crate::domain::player::{Nationality, Player, PlayerCategory, PlayerId};
use crate::domain::storage::Storage;
use crate::domain::team::{CricketTeam, CricketTeamId};
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// Request to add a player to an event's pool
#[derive(Debug, Clone)]
pub struct CreatePlayerRequest {
    pub event_id: String,
    pub team_id: String,
    pub name: String,
    pub category: PlayerCategory,
    pub nationality: Nationality,
}

/// Request to update a player
#[derive(Debug, Clone)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub category: Option<PlayerCategory>,
    pub nationality: Option<Nationality>,
    pub team_id: Option<String>,
}

#[derive(Debug)]
pub struct PlayerService {
    players: Arc<dyn Storage<Player>>,
    teams: Arc<dyn Storage<CricketTeam>>,
    feed: Arc<ChangeFeed>,
}

impl PlayerService {
    pub fn new(
        players: Arc<dyn Storage<Player>>,
        teams: Arc<dyn Storage<CricketTeam>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            players,
            teams,
            feed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Player>, DomainError> {
        self.players.get(&PlayerId::from_string(id)).await
    }

    pub async fn get_required(&self, id: &str) -> Result<Player, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Player '{}' not found", id)))
    }

    /// Players of one event, sorted by name
    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<Player>, DomainError> {
        let event_id = EventId::from_string(event_id);
        let mut players: Vec<Player> = self
            .players
            .list()
            .await?
            .into_iter()
            .filter(|player| player.event_id() == &event_id)
            .collect();
        players.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(players)
    }

    pub async fn create(&self, request: CreatePlayerRequest) -> Result<Player, DomainError> {
        let player = self.build_player(&request).await?;
        let player = self.players.create(player).await?;
        self.feed.publish(Collection::Players);
        Ok(player)
    }

    /// Bulk import; every player starts with an empty points sequence
    pub async fn create_bulk(
        &self,
        requests: Vec<CreatePlayerRequest>,
    ) -> Result<Vec<Player>, DomainError> {
        let mut created = Vec::with_capacity(requests.len());

        for request in &requests {
            let player = self.build_player(request).await?;
            created.push(self.players.create(player).await?);
        }

        debug!(count = created.len(), "Bulk player import complete");
        if !created.is_empty() {
            self.feed.publish(Collection::Players);
        }
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdatePlayerRequest,
    ) -> Result<Player, DomainError> {
        let mut player = self.get_required(id).await?;

        if let Some(name) = request.name {
            player
                .set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(category) = request.category {
            player.set_category(category);
        }

        if let Some(nationality) = request.nationality {
            player.set_nationality(nationality);
        }

        if let Some(team_id) = request.team_id {
            let team = self.resolve_team(&team_id, player.event_id()).await?;
            player.set_team(team.id().clone(), team.name());
        }

        let player = self.players.update(player).await?;
        self.feed.publish(Collection::Players);
        Ok(player)
    }

    /// Replace a player's full per-period points sequence (score entry)
    pub async fn set_points(
        &self,
        id: &str,
        points: Vec<Option<i64>>,
    ) -> Result<Player, DomainError> {
        let mut player = self.get_required(id).await?;
        player
            .set_points(points)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let player = self.players.update(player).await?;
        self.feed.publish(Collection::Players);
        Ok(player)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self.players.delete(&PlayerId::from_string(id)).await?;
        if deleted {
            self.feed.publish(Collection::Players);
        }
        Ok(deleted)
    }

    async fn build_player(&self, request: &CreatePlayerRequest) -> Result<Player, DomainError> {
        let event_id = EventId::from_string(&request.event_id);
        let team = self.resolve_team(&request.team_id, &event_id).await?;

        Player::new(
            event_id,
            team.id().clone(),
            team.name(),
            request.name.clone(),
            request.category,
            request.nationality,
        )
        .map_err(|e| DomainError::validation(e.to_string()))
    }

    async fn resolve_team(
        &self,
        team_id: &str,
        event_id: &EventId,
    ) -> Result<CricketTeam, DomainError> {
        let team = self
            .teams
            .get(&CricketTeamId::from_string(team_id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", team_id)))?;

        if team.event_id() != event_id {
            return Err(DomainError::validation(
                "Team does not belong to this event",
            ));
        }

        Ok(team)
    }
}
