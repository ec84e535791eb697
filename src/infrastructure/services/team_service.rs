//! Cricket team service - CRUD for real-world teams within an event

use std::sync::Arc;

use crate::domain::event::{Event, EventId};
use crate::domain::storage::Storage;
use crate::domain::team::{CricketTeam, CricketTeamId};
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// Request to register a real-world team for an event
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub event_id: String,
    pub name: String,
    pub short_name: Option<String>,
}

/// Request to update a team
#[derive(Debug, Clone)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Debug)]
pub struct TeamService {
    teams: Arc<dyn Storage<CricketTeam>>,
    events: Arc<dyn Storage<Event>>,
    feed: Arc<ChangeFeed>,
}

impl TeamService {
    pub fn new(
        teams: Arc<dyn Storage<CricketTeam>>,
        events: Arc<dyn Storage<Event>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            teams,
            events,
            feed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<CricketTeam>, DomainError> {
        self.teams.get(&CricketTeamId::from_string(id)).await
    }

    pub async fn get_required(&self, id: &str) -> Result<CricketTeam, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))
    }

    /// Teams of one event, sorted by name
    pub async fn list_for_event(&self, event_id: &str) -> Result<Vec<CricketTeam>, DomainError> {
        let event_id = EventId::from_string(event_id);
        let mut teams: Vec<CricketTeam> = self
            .teams
            .list()
            .await?
            .into_iter()
            .filter(|team| team.event_id() == &event_id)
            .collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    pub async fn create(&self, request: CreateTeamRequest) -> Result<CricketTeam, DomainError> {
        let event_id = EventId::from_string(&request.event_id);
        if self.events.get(&event_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Event '{}' not found",
                request.event_id
            )));
        }

        let mut team = CricketTeam::new(event_id, request.name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(short_name) = request.short_name {
            team = team.with_short_name(short_name);
        }

        let team = self.teams.create(team).await?;
        self.feed.publish(Collection::Teams);
        Ok(team)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateTeamRequest,
    ) -> Result<CricketTeam, DomainError> {
        let mut team = self.get_required(id).await?;

        if let Some(name) = request.name {
            team.set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(short_name) = request.short_name {
            team.set_short_name(Some(short_name));
        }

        let team = self.teams.update(team).await?;
        self.feed.publish(Collection::Teams);
        Ok(team)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let deleted = self.teams.delete(&CricketTeamId::from_string(id)).await?;
        if deleted {
            self.feed.publish(Collection::Teams);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::LeagueType;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{Duration, Utc};

    async fn setup() -> (TeamService, Event) {
        let now = Utc::now();
        let event = Event::new(
            "Cup",
            LeagueType::Domestic,
            now + Duration::days(7),
            now + Duration::days(30),
        )
        .unwrap();

        let events = Arc::new(InMemoryStorage::with_entities(vec![event.clone()]));
        let service = TeamService::new(
            Arc::new(InMemoryStorage::new()),
            events,
            Arc::new(ChangeFeed::new()),
        );
        (service, event)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (service, event) = setup().await;

        service
            .create(CreateTeamRequest {
                event_id: event.id().as_str().to_string(),
                name: "Kolkata Knight Riders".to_string(),
                short_name: Some("KKR".to_string()),
            })
            .await
            .unwrap();
        service
            .create(CreateTeamRequest {
                event_id: event.id().as_str().to_string(),
                name: "Chennai Super Kings".to_string(),
                short_name: None,
            })
            .await
            .unwrap();

        let teams = service.list_for_event(event.id().as_str()).await.unwrap();
        assert_eq!(teams.len(), 2);
        // sorted by name
        assert_eq!(teams[0].name(), "Chennai Super Kings");
    }

    #[tokio::test]
    async fn test_create_unknown_event() {
        let (service, _) = setup().await;

        let result = service
            .create(CreateTeamRequest {
                event_id: "missing".to_string(),
                name: "Team".to_string(),
                short_name: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update() {
        let (service, event) = setup().await;
        let team = service
            .create(CreateTeamRequest {
                event_id: event.id().as_str().to_string(),
                name: "Old".to_string(),
                short_name: None,
            })
            .await
            .unwrap();

        let updated = service
            .update(
                team.id().as_str(),
                UpdateTeamRequest {
                    name: Some("New".to_string()),
                    short_name: Some("NEW".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "New");
        assert_eq!(updated.short_name(), Some("NEW"));
    }

    #[tokio::test]
    async fn test_delete() {
        let (service, event) = setup().await;
        let team = service
            .create(CreateTeamRequest {
                event_id: event.id().as_str().to_string(),
                name: "Gone".to_string(),
                short_name: None,
            })
            .await
            .unwrap();

        assert!(service.delete(team.id().as_str()).await.unwrap());
        assert!(!service.delete(team.id().as_str()).await.unwrap());
    }
}
