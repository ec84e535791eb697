//! Points and standings computation
//!
//! Pure functions over immutable snapshots: the same inputs always produce
//! the same totals, and nothing here touches storage.

use std::collections::HashMap;

use serde::Serialize;

use super::entity::{Roster, RosterId};
use crate::domain::player::{Player, PlayerId};

/// Earned points in a VIP slot count double
const VIP_MULTIPLIER: i64 = 2;

/// Sum a player's per-period values, treating unreported periods as zero
pub fn player_total(points: &[Option<i64>]) -> i64 {
    points.iter().flatten().sum()
}

/// Pre-computed total per player, so roster totals avoid re-summing the
/// period sequences for every slot
pub fn points_table(players: &[Player]) -> HashMap<PlayerId, i64> {
    players
        .iter()
        .map(|player| (player.id().clone(), player_total(player.points())))
        .collect()
}

/// Total points credited to a roster: archived points plus, for each slot,
/// the player's points earned since joining, doubled for VIP slots.
/// Players absent from the table contribute zero.
pub fn roster_total(roster: &Roster, totals: &HashMap<PlayerId, i64>) -> i64 {
    let slot_points: i64 = roster
        .slots()
        .iter()
        .map(|slot| {
            let earned = totals.get(&slot.player_id).copied().unwrap_or(0);
            let since_joining = earned - roster.join_offset(&slot.player_id);
            if slot.vip {
                since_joining * VIP_MULTIPLIER
            } else {
                since_joining
            }
        })
        .sum();

    roster.archived_points() + slot_points
}

/// One row of an event's leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct StandingRow {
    pub roster_id: RosterId,
    pub participant_name: String,
    pub team_name: String,
    pub total: i64,
    /// 1-based position in the sorted order
    pub rank: usize,
}

/// Rank rosters by total, descending. Equal totals order by roster creation
/// time (earlier roster ranks higher), then by id, so standings are
/// deterministic rather than dependent on store enumeration order.
pub fn compute_standings(
    rosters: &[Roster],
    totals: &HashMap<PlayerId, i64>,
) -> Vec<StandingRow> {
    let mut scored: Vec<(&Roster, i64)> = rosters
        .iter()
        .map(|roster| (roster, roster_total(roster, totals)))
        .collect();

    scored.sort_by(|(a, a_total), (b, b_total)| {
        b_total
            .cmp(a_total)
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.id().as_str().cmp(b.id().as_str()))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (roster, total))| StandingRow {
            roster_id: roster.id().clone(),
            participant_name: roster.participant_name().to_string(),
            team_name: roster.team_name().to_string(),
            total,
            rank: index + 1,
        })
        .collect()
}

/// Rank of one roster within its event's standings, if present
pub fn rank_of(standings: &[StandingRow], roster_id: &RosterId) -> Option<usize> {
    standings
        .iter()
        .find(|row| &row.roster_id == roster_id)
        .map(|row| row.rank)
}
