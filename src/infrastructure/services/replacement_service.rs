//! Replacement service - the mid-tournament swap workflow
//!
//! Participants propose a swap, the administrator reviews it; only an
//! accepted request actually alters the roster.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::event::{Event, EventPhase};
use crate::domain::player::{Player, PlayerId};
use crate::domain::replacement::{ReplacementRequest, ReplacementRequestId};
use crate::domain::roster::{evaluate_lineup, player_total, LineupRules, LineupSlot, Roster};
use crate::domain::storage::Storage;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// A participant's swap proposal
#[derive(Debug, Clone)]
pub struct SubmitReplacementRequest {
    pub roster_id: String,
    pub outgoing_player_id: String,
    pub incoming_player_id: String,
    pub note: Option<String>,
}

#[derive(Debug)]
pub struct ReplacementService {
    requests: Arc<dyn Storage<ReplacementRequest>>,
    rosters: Arc<dyn Storage<Roster>>,
    events: Arc<dyn Storage<Event>>,
    players: Arc<dyn Storage<Player>>,
    feed: Arc<ChangeFeed>,
}

impl ReplacementService {
    pub fn new(
        requests: Arc<dyn Storage<ReplacementRequest>>,
        rosters: Arc<dyn Storage<Roster>>,
        events: Arc<dyn Storage<Event>>,
        players: Arc<dyn Storage<Player>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            requests,
            rosters,
            events,
            players,
            feed,
        }
    }

    pub async fn get_required(&self, id: &str) -> Result<ReplacementRequest, DomainError> {
        self.requests
            .get(&ReplacementRequestId::from_string(id))
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Replacement request '{}' not found", id))
            })
    }

    /// A roster's requests, newest first
    pub async fn list_for_roster(
        &self,
        roster_id: &str,
    ) -> Result<Vec<ReplacementRequest>, DomainError> {
        let roster_id = crate::domain::roster::RosterId::from_string(roster_id);
        let mut requests: Vec<ReplacementRequest> = self
            .requests
            .list()
            .await?
            .into_iter()
            .filter(|request| request.roster_id() == &roster_id)
            .collect();
        requests.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(requests)
    }

    /// The administrator's review queue, oldest first
    pub async fn list_pending(&self) -> Result<Vec<ReplacementRequest>, DomainError> {
        let mut requests: Vec<ReplacementRequest> = self
            .requests
            .list()
            .await?
            .into_iter()
            .filter(|request| request.status().is_pending())
            .collect();
        requests.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(requests)
    }

    /// Submit a swap proposal for review. The prospective lineup must pass
    /// the composition rules before the request is even queued.
    pub async fn submit(
        &self,
        participant: &User,
        request: SubmitReplacementRequest,
    ) -> Result<ReplacementRequest, DomainError> {
        let roster = self.roster_required(&request.roster_id).await?;
        if roster.participant_id() != participant.id() {
            return Err(DomainError::forbidden("This is not your roster"));
        }

        let event = self
            .events
            .get(roster.event_id())
            .await?
            .ok_or_else(|| DomainError::not_found("Event for this roster no longer exists"))?;
        if event.phase_at(Utc::now()) != EventPhase::Running {
            return Err(DomainError::validation(
                "Replacements are only available while the tournament is running",
            ));
        }
        if roster.replacements_left() == 0 {
            return Err(DomainError::validation(
                "No replacements remaining for this roster",
            ));
        }

        let outgoing = PlayerId::from_string(&request.outgoing_player_id);
        let incoming = self.incoming_player(&event, &request).await?;
        self.check_swap(&roster, &event, &outgoing, &incoming)
            .await?;

        let replacement = ReplacementRequest::new(
            roster.id().clone(),
            roster.participant_name(),
            outgoing,
            incoming.id().clone(),
            request.note,
        );

        let replacement = self.requests.create(replacement).await?;
        info!(request_id = %replacement.id(), roster_id = %roster.id(), "Replacement request submitted");
        self.feed.publish(Collection::ReplacementRequests);
        Ok(replacement)
    }

    /// Accept a pending request: the swap is re-validated against the
    /// current roster, then applied. The incoming player's join offset is
    /// their total at this moment, so earlier points never credit the
    /// roster.
    pub async fn accept(
        &self,
        id: &str,
        reason: Option<String>,
    ) -> Result<ReplacementRequest, DomainError> {
        let mut request = self.get_required(id).await?;
        let mut roster = self.roster_required(request.roster_id().as_str()).await?;
        let event = self
            .events
            .get(roster.event_id())
            .await?
            .ok_or_else(|| DomainError::not_found("Event for this roster no longer exists"))?;

        let incoming = self
            .players
            .get(request.incoming_player_id())
            .await?
            .ok_or_else(|| DomainError::not_found("Incoming player no longer exists"))?;
        self.check_swap(&roster, &event, request.outgoing_player_id(), &incoming)
            .await?;

        let points_at_joining = player_total(incoming.points());
        let outgoing = request.outgoing_player_id().clone();
        roster
            .apply_swap(&outgoing, incoming.id().clone(), points_at_joining)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        request
            .accept(reason)
            .map_err(|e| DomainError::conflict(e.to_string()))?;

        self.rosters.update(roster).await?;
        let request = self.requests.update(request).await?;
        info!(request_id = %request.id(), "Replacement accepted and applied");
        self.feed.publish(Collection::Rosters);
        self.feed.publish(Collection::ReplacementRequests);
        Ok(request)
    }

    /// Reject a pending request with a reason for the participant
    pub async fn reject(
        &self,
        id: &str,
        reason: impl Into<String>,
    ) -> Result<ReplacementRequest, DomainError> {
        let mut request = self.get_required(id).await?;
        request
            .reject(reason)
            .map_err(|e| DomainError::conflict(e.to_string()))?;

        let request = self.requests.update(request).await?;
        self.feed.publish(Collection::ReplacementRequests);
        Ok(request)
    }

    async fn roster_required(&self, roster_id: &str) -> Result<Roster, DomainError> {
        self.rosters
            .get(&crate::domain::roster::RosterId::from_string(roster_id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Roster '{}' not found", roster_id)))
    }

    async fn incoming_player(
        &self,
        event: &Event,
        request: &SubmitReplacementRequest,
    ) -> Result<Player, DomainError> {
        let incoming = self
            .players
            .get(&PlayerId::from_string(&request.incoming_player_id))
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "Player '{}' not found",
                    request.incoming_player_id
                ))
            })?;
        if incoming.event_id() != event.id() {
            return Err(DomainError::validation(
                "The incoming player does not belong to this event",
            ));
        }
        Ok(incoming)
    }

    /// Re-run the composition checks (single-team, role floors, foreign
    /// cap) against the lineup that would result from the swap. Cardinality
    /// and VIP placement are untouched by a like-for-like swap, so those
    /// checks are skipped.
    async fn check_swap(
        &self,
        roster: &Roster,
        event: &Event,
        outgoing: &PlayerId,
        incoming: &Player,
    ) -> Result<(), DomainError> {
        if !roster.contains_player(outgoing) {
            return Err(DomainError::validation(
                "The outgoing player is not in this roster",
            ));
        }
        if roster.contains_player(incoming.id()) {
            return Err(DomainError::validation(
                "The incoming player is already in this roster",
            ));
        }

        let prospective = self.prospective_players(roster, outgoing, incoming).await?;
        let lineup: Vec<Option<LineupSlot<'_>>> = prospective
            .iter()
            .map(|player| Some(LineupSlot { player, vip: false }))
            .collect();
        let rules = LineupRules::for_event(event);
        let report = evaluate_lineup(&lineup, &rules);

        if !report.swap_ok() {
            let message = report
                .first_swap_violation(&rules)
                .unwrap_or_else(|| "The swap would break the lineup rules".to_string());
            return Err(DomainError::validation(message));
        }
        Ok(())
    }

    /// The roster's players with the outgoing one substituted; slots whose
    /// player record has vanished are skipped rather than failing the swap
    async fn prospective_players(
        &self,
        roster: &Roster,
        outgoing: &PlayerId,
        incoming: &Player,
    ) -> Result<Vec<Player>, DomainError> {
        let mut players = Vec::with_capacity(roster.slots().len());

        for slot in roster.slots() {
            if &slot.player_id == outgoing {
                players.push(incoming.clone());
            } else if let Some(player) = self.players.get(&slot.player_id).await? {
                players.push(player);
            }
        }

        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::LeagueType;
    use crate::domain::replacement::ReplacementStatus;
    use crate::domain::roster::RosterSlot;
    use crate::domain::player::{Nationality, PlayerCategory};
    use crate::domain::team::CricketTeamId;
    use crate::domain::user::UserRole;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::Duration;

    struct Fixture {
        service: ReplacementService,
        rosters: Arc<InMemoryStorage<Roster>>,
        players: Arc<InMemoryStorage<Player>>,
        participant: User,
        roster: Roster,
        pool: Vec<Player>,
        bench: Player,
    }

    fn player(
        event: &Event,
        team: &CricketTeamId,
        name: &str,
        category: PlayerCategory,
    ) -> Player {
        Player::new(
            event.id().clone(),
            team.clone(),
            "Team",
            name,
            category,
            Nationality::Domestic,
        )
        .unwrap()
    }

    /// A running event, one committed legal roster and one bench bowler
    async fn fixture() -> Fixture {
        let now = Utc::now();
        let event = Event::new(
            "Summer Cup",
            LeagueType::Domestic,
            now - Duration::days(1),
            now + Duration::days(20),
        )
        .unwrap();

        let teams = [
            CricketTeamId::generate(),
            CricketTeamId::generate(),
            CricketTeamId::generate(),
        ];
        let mut pool = Vec::new();
        pool.push(player(&event, &teams[0], "Keeper", PlayerCategory::Wicketkeeper));
        for i in 0..3 {
            pool.push(player(&event, &teams[i], "Bat", PlayerCategory::Batsman));
        }
        for i in 0..3 {
            pool.push(player(&event, &teams[i], "AR", PlayerCategory::AllRounder));
        }
        for i in [0, 1, 2, 1] {
            pool.push(player(&event, &teams[i], "Bowl", PlayerCategory::Bowler));
        }
        let bench = player(&event, &teams[2], "Bench Bowler", PlayerCategory::Bowler);

        let participant =
            User::new("Asha Rahman", "asha@example.com", UserRole::Participant, "h").unwrap();
        let slots = pool
            .iter()
            .enumerate()
            .map(|(i, p)| RosterSlot::new(p.id().clone(), i == 1))
            .collect();
        let roster = Roster::new(
            event.id().clone(),
            participant.id().clone(),
            participant.full_name(),
            "Asha's XI",
            slots,
            2,
        )
        .unwrap();

        let mut stored = pool.clone();
        stored.push(bench.clone());
        let rosters = Arc::new(InMemoryStorage::with_entities(vec![roster.clone()]));
        let players = Arc::new(InMemoryStorage::with_entities(stored));
        let service = ReplacementService::new(
            Arc::new(InMemoryStorage::new()),
            rosters.clone(),
            Arc::new(InMemoryStorage::with_entities(vec![event])),
            players.clone(),
            Arc::new(ChangeFeed::new()),
        );

        Fixture {
            service,
            rosters,
            players,
            participant,
            roster,
            pool,
            bench,
        }
    }

    fn swap_request(fixture: &Fixture, outgoing: &Player) -> SubmitReplacementRequest {
        SubmitReplacementRequest {
            roster_id: fixture.roster.id().as_str().to_string(),
            outgoing_player_id: outgoing.id().as_str().to_string(),
            incoming_player_id: fixture.bench.id().as_str().to_string(),
            note: Some("Out injured".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_legal_swap() {
        let fixture = fixture().await;
        // swap a bowler out for the bench bowler
        let outgoing = fixture.pool[10].clone();

        let request = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &outgoing))
            .await
            .unwrap();

        assert!(request.status().is_pending());
        assert_eq!(request.participant_name(), "Asha Rahman");
        // submission alone does not touch the roster
        let roster = fixture
            .rosters
            .get(fixture.roster.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(roster.replacements_left(), 2);
        assert!(roster.contains_player(outgoing.id()));
    }

    #[tokio::test]
    async fn test_submit_rejects_foreign_roster() {
        let fixture = fixture().await;
        let stranger =
            User::new("Bashir", "bashir@example.com", UserRole::Participant, "h").unwrap();

        let result = fixture
            .service
            .submit(&stranger, swap_request(&fixture, &fixture.pool[10]))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Forbidden { .. }
        ));
    }

    #[tokio::test]
    async fn test_submit_rejects_rule_breaking_swap() {
        let fixture = fixture().await;
        // swapping the only wicketkeeper for a bowler empties the keeper slot
        let result = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &fixture.pool[0]))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("Wicketkeeper"));
    }

    #[tokio::test]
    async fn test_submit_rejects_outgoing_not_in_roster() {
        let fixture = fixture().await;
        let mut request = swap_request(&fixture, &fixture.pool[10]);
        request.outgoing_player_id = fixture.bench.id().as_str().to_string();
        request.incoming_player_id = fixture.pool[10].id().as_str().to_string();

        let result = fixture.service.submit(&fixture.participant, request).await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_submit_exhausted_budget() {
        let fixture = fixture().await;
        let mut roster = fixture.roster.clone();
        // burn the budget with two swaps applied directly
        roster
            .apply_swap(fixture.pool[10].id(), PlayerId::generate(), 0)
            .unwrap();
        roster
            .apply_swap(fixture.pool[9].id(), PlayerId::generate(), 0)
            .unwrap();
        fixture.rosters.update(roster).await.unwrap();

        let result = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &fixture.pool[8]))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_accept_applies_swap_with_join_offset() {
        let fixture = fixture().await;
        // the bench player already has points before joining
        let mut bench = fixture.bench.clone();
        bench.set_points(vec![Some(40), Some(20)]).unwrap();
        fixture.players.update(bench).await.unwrap();

        let outgoing = fixture.pool[10].clone();
        let request = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &outgoing))
            .await
            .unwrap();

        let decided = fixture
            .service
            .accept(request.id().as_str(), None)
            .await
            .unwrap();
        assert_eq!(decided.status(), ReplacementStatus::Accepted);

        let roster = fixture
            .rosters
            .get(fixture.roster.id())
            .await
            .unwrap()
            .unwrap();
        assert!(!roster.contains_player(outgoing.id()));
        assert!(roster.contains_player(fixture.bench.id()));
        assert_eq!(roster.join_offset(fixture.bench.id()), 60);
        assert_eq!(roster.replacements_left(), 1);
    }

    #[tokio::test]
    async fn test_reject_leaves_roster_untouched() {
        let fixture = fixture().await;
        let outgoing = fixture.pool[10].clone();
        let request = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &outgoing))
            .await
            .unwrap();

        let decided = fixture
            .service
            .reject(request.id().as_str(), "Window closed")
            .await
            .unwrap();
        assert_eq!(decided.status(), ReplacementStatus::Rejected);
        assert_eq!(decided.reason(), Some("Window closed"));

        let roster = fixture
            .rosters
            .get(fixture.roster.id())
            .await
            .unwrap()
            .unwrap();
        assert!(roster.contains_player(outgoing.id()));
        assert_eq!(roster.replacements_left(), 2);
    }

    #[tokio::test]
    async fn test_double_decision_conflicts() {
        let fixture = fixture().await;
        let request = fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &fixture.pool[10]))
            .await
            .unwrap();
        fixture
            .service
            .accept(request.id().as_str(), None)
            .await
            .unwrap();

        let result = fixture.service.reject(request.id().as_str(), "late").await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_pending_oldest_first() {
        let fixture = fixture().await;
        fixture
            .service
            .submit(&fixture.participant, swap_request(&fixture, &fixture.pool[10]))
            .await
            .unwrap();

        let pending = fixture.service.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
    }
}
