//! Standings service - leaderboard snapshots for one event
//!
//! A thin fetch layer over the pure scoring functions: rosters and players
//! are read once per request and ranked in memory.

use std::sync::Arc;

use crate::domain::event::{Event, EventId};
use crate::domain::player::Player;
use crate::domain::roster::{
    compute_standings, points_table, rank_of, roster_total, Roster, StandingRow,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StandingsService {
    events: Arc<dyn Storage<Event>>,
    rosters: Arc<dyn Storage<Roster>>,
    players: Arc<dyn Storage<Player>>,
}

impl StandingsService {
    pub fn new(
        events: Arc<dyn Storage<Event>>,
        rosters: Arc<dyn Storage<Roster>>,
        players: Arc<dyn Storage<Player>>,
    ) -> Self {
        Self {
            events,
            rosters,
            players,
        }
    }

    /// Ranked leaderboard of one event
    pub async fn standings_for_event(
        &self,
        event_id: &str,
    ) -> Result<Vec<StandingRow>, DomainError> {
        let event_id = EventId::from_string(event_id);
        if self.events.get(&event_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Event '{}' not found",
                event_id
            )));
        }

        let rosters: Vec<Roster> = self
            .rosters
            .list()
            .await?
            .into_iter()
            .filter(|roster| roster.event_id() == &event_id)
            .collect();
        let players: Vec<Player> = self
            .players
            .list()
            .await?
            .into_iter()
            .filter(|player| player.event_id() == &event_id)
            .collect();

        Ok(compute_standings(&rosters, &points_table(&players)))
    }

    /// One roster's current total and rank within its event
    pub async fn roster_summary(
        &self,
        roster: &Roster,
    ) -> Result<(i64, Option<usize>), DomainError> {
        let standings = self
            .standings_for_event(roster.event_id().as_str())
            .await?;
        let players: Vec<Player> = self
            .players
            .list()
            .await?
            .into_iter()
            .filter(|player| player.event_id() == roster.event_id())
            .collect();

        let total = roster_total(roster, &points_table(&players));
        Ok((total, rank_of(&standings, roster.id())))
    }
}
