//! Roster service - lineup submission, pre-deadline edits and visibility

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::event::{Event, EventId};
use crate::domain::player::{Player, PlayerId};
use crate::domain::roster::{
    evaluate_lineup, LineupReport, LineupRules, LineupSlot, Roster, RosterId, RosterSlot,
};
use crate::domain::settings::{SettingsKey, SiteSettings};
use crate::domain::storage::Storage;
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;
use crate::infrastructure::notify::{ChangeFeed, Collection};

/// One picked slot of a prospective lineup
#[derive(Debug, Clone)]
pub struct SlotSelection {
    pub player_id: String,
    pub vip: bool,
}

/// Full lineup submitted for creation, edit or a dry-run validation.
/// `None` entries are slots the participant has not filled yet.
#[derive(Debug, Clone)]
pub struct SaveRosterRequest {
    pub event_id: String,
    pub team_name: String,
    pub slots: Vec<Option<SlotSelection>>,
}

#[derive(Debug)]
pub struct RosterService {
    rosters: Arc<dyn Storage<Roster>>,
    events: Arc<dyn Storage<Event>>,
    players: Arc<dyn Storage<Player>>,
    settings: Arc<dyn Storage<SiteSettings>>,
    feed: Arc<ChangeFeed>,
}

impl RosterService {
    pub fn new(
        rosters: Arc<dyn Storage<Roster>>,
        events: Arc<dyn Storage<Event>>,
        players: Arc<dyn Storage<Player>>,
        settings: Arc<dyn Storage<SiteSettings>>,
        feed: Arc<ChangeFeed>,
    ) -> Self {
        Self {
            rosters,
            events,
            players,
            settings,
            feed,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Roster>, DomainError> {
        self.rosters.get(&RosterId::from_string(id)).await
    }

    pub async fn get_required(&self, id: &str) -> Result<Roster, DomainError> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Roster '{}' not found", id)))
    }

    /// The caller's own roster for one event, if committed
    pub async fn get_mine(
        &self,
        participant_id: &UserId,
        event_id: &str,
    ) -> Result<Option<Roster>, DomainError> {
        let event_id = EventId::from_string(event_id);
        Ok(self
            .rosters
            .list()
            .await?
            .into_iter()
            .find(|roster| {
                roster.event_id() == &event_id && roster.participant_id() == participant_id
            }))
    }

    /// All rosters of one event. Before the registration deadline other
    /// participants' teams stay hidden unless the administrator has turned
    /// on the site-wide reveal; administrators always see everything.
    pub async fn list_for_event(
        &self,
        viewer: &User,
        event_id: &str,
    ) -> Result<Vec<Roster>, DomainError> {
        let event = self.event_required(event_id).await?;

        if !viewer.is_admin() && event.registration_open(Utc::now()) {
            let revealed = self
                .settings
                .get(&SettingsKey::singleton())
                .await?
                .unwrap_or_default()
                .show_participant_teams();
            if !revealed {
                return Err(DomainError::forbidden(
                    "Participant teams are hidden until the registration deadline",
                ));
            }
        }

        let event_id = event.id().clone();
        let mut rosters: Vec<Roster> = self
            .rosters
            .list()
            .await?
            .into_iter()
            .filter(|roster| roster.event_id() == &event_id)
            .collect();
        rosters.sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        Ok(rosters)
    }

    /// Dry-run evaluation of a prospective lineup; nothing is committed
    pub async fn validate(&self, request: &SaveRosterRequest) -> Result<LineupReport, DomainError> {
        let event = self.event_required(&request.event_id).await?;
        let resolved = self.resolve_selection(&event, &request.slots).await?;
        Ok(report_for(&resolved, &LineupRules::for_event(&event)))
    }

    /// Commit a new roster; one per participant per event
    pub async fn create(
        &self,
        participant: &User,
        request: SaveRosterRequest,
    ) -> Result<Roster, DomainError> {
        let event = self.event_required(&request.event_id).await?;

        if !event.registration_open(Utc::now()) {
            return Err(DomainError::validation(
                "Registration for this event has closed",
            ));
        }
        if self
            .get_mine(participant.id(), &request.event_id)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(
                "You already have a team in this event",
            ));
        }

        let slots = self.checked_lineup(&event, &request.slots).await?;
        let roster = Roster::new(
            event.id().clone(),
            participant.id().clone(),
            participant.full_name(),
            request.team_name,
            slots,
            event.max_replacements(),
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        let roster = self.rosters.create(roster).await?;
        info!(roster_id = %roster.id(), event_id = %event.id(), "Roster committed");
        self.feed.publish(Collection::Rosters);
        Ok(roster)
    }

    /// Full replace-and-revalidate of the caller's roster, allowed only
    /// while registration is open; later changes go through replacement
    /// requests
    pub async fn update_mine(
        &self,
        participant: &User,
        request: SaveRosterRequest,
    ) -> Result<Roster, DomainError> {
        let event = self.event_required(&request.event_id).await?;

        if !event.registration_open(Utc::now()) {
            return Err(DomainError::validation(
                "The registration deadline has passed; request a replacement instead",
            ));
        }

        let mut roster = self
            .get_mine(participant.id(), &request.event_id)
            .await?
            .ok_or_else(|| DomainError::not_found("You have no team in this event"))?;

        let slots = self.checked_lineup(&event, &request.slots).await?;
        roster
            .set_lineup(request.team_name, slots)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let roster = self.rosters.update(roster).await?;
        self.feed.publish(Collection::Rosters);
        Ok(roster)
    }

    /// Administrator adjustment of a roster's banked points
    pub async fn set_archived_points(
        &self,
        id: &str,
        points: i64,
    ) -> Result<Roster, DomainError> {
        let mut roster = self.get_required(id).await?;
        roster.set_archived_points(points);

        let roster = self.rosters.update(roster).await?;
        self.feed.publish(Collection::Rosters);
        Ok(roster)
    }

    async fn event_required(&self, event_id: &str) -> Result<Event, DomainError> {
        self.events
            .get(&EventId::from_string(event_id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Event '{}' not found", event_id)))
    }

    /// Resolve selections to full player records, rejecting players that do
    /// not exist or belong to another event
    async fn resolve_selection(
        &self,
        event: &Event,
        slots: &[Option<SlotSelection>],
    ) -> Result<Vec<Option<(Player, bool)>>, DomainError> {
        let mut resolved = Vec::with_capacity(slots.len());

        for slot in slots {
            match slot {
                None => resolved.push(None),
                Some(selection) => {
                    let player = self
                        .players
                        .get(&PlayerId::from_string(&selection.player_id))
                        .await?
                        .ok_or_else(|| {
                            DomainError::not_found(format!(
                                "Player '{}' not found",
                                selection.player_id
                            ))
                        })?;
                    if player.event_id() != event.id() {
                        return Err(DomainError::validation(format!(
                            "Player '{}' does not belong to this event",
                            player.name()
                        )));
                    }
                    resolved.push(Some((player, selection.vip)));
                }
            }
        }

        Ok(resolved)
    }

    /// Resolve, run the full ruleset and convert to committed slots; the
    /// first violated rule surfaces as the error message
    async fn checked_lineup(
        &self,
        event: &Event,
        slots: &[Option<SlotSelection>],
    ) -> Result<Vec<RosterSlot>, DomainError> {
        let resolved = self.resolve_selection(event, slots).await?;
        let rules = LineupRules::for_event(event);
        let report = report_for(&resolved, &rules);

        if !report.submission_ok() {
            let message = report
                .first_violation(&rules)
                .unwrap_or_else(|| "The selected lineup is not valid".to_string());
            return Err(DomainError::validation(message));
        }

        Ok(resolved
            .into_iter()
            .flatten()
            .map(|(player, vip)| RosterSlot::new(player.id().clone(), vip))
            .collect())
    }
}

fn report_for(resolved: &[Option<(Player, bool)>], rules: &LineupRules) -> LineupReport {
    let lineup: Vec<Option<LineupSlot<'_>>> = resolved
        .iter()
        .map(|slot| {
            slot.as_ref().map(|(player, vip)| LineupSlot {
                player,
                vip: *vip,
            })
        })
        .collect();
    evaluate_lineup(&lineup, rules)
}
