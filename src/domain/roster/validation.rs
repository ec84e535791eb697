//! Lineup eligibility rules
//!
//! A pure ruleset over an in-memory selection snapshot. Every check is
//! always evaluated and reported, never short-circuited, so a caller can
//! show the participant all violations at once. Evaluation itself cannot
//! fail; the caller decides whether a failing report blocks submission.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::event::Event;
use crate::domain::player::Player;

/// A committed roster always holds exactly this many players
pub const LINEUP_SIZE: usize = 11;

/// At least one wicketkeeper
const WICKETKEEPER_FLOOR: usize = 1;
/// At least two dedicated bowlers (all-rounders do not count here)
const BOWLER_FLOOR: usize = 2;
/// At least five players who can bowl (bowlers plus all-rounders)
const BOWL_CAPABLE_FLOOR: usize = 5;
/// Stand-in cap when a domestic event does not configure one
const UNLIMITED_FOREIGN: usize = 99;

/// Rule parameters extracted from the governing event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupRules {
    pub max_vip_players: usize,
    pub max_from_single_team: usize,
    pub max_foreign_players: Option<usize>,
    pub domestic: bool,
}

impl LineupRules {
    /// Derive the rules from an event's configuration
    pub fn for_event(event: &Event) -> Self {
        Self {
            max_vip_players: event.max_vip_players() as usize,
            max_from_single_team: event.max_players_from_single_team() as usize,
            max_foreign_players: event.max_foreign_players().map(|cap| cap as usize),
            domestic: event.league_type().is_domestic(),
        }
    }
}

/// One slot of a prospective lineup, resolved to the full player record
#[derive(Debug, Clone, Copy)]
pub struct LineupSlot<'a> {
    pub player: &'a Player,
    pub vip: bool,
}

/// Result of a single check: what was counted, against which bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub actual: usize,
    pub bound: usize,
    pub passed: bool,
}

impl CheckOutcome {
    fn exactly(actual: usize, expected: usize) -> Self {
        Self {
            actual,
            bound: expected,
            passed: actual == expected,
        }
    }

    fn at_least(actual: usize, floor: usize) -> Self {
        Self {
            actual,
            bound: floor,
            passed: actual >= floor,
        }
    }

    fn at_most(actual: usize, cap: usize) -> Self {
        Self {
            actual,
            bound: cap,
            passed: actual <= cap,
        }
    }

    fn waived(actual: usize, cap: usize) -> Self {
        Self {
            actual,
            bound: cap,
            passed: true,
        }
    }
}

/// Per-constraint validity report for a prospective lineup
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineupReport {
    /// Exactly eleven filled slots
    pub completeness: CheckOutcome,
    /// VIP count equals the event quota exactly
    pub vip_quota: CheckOutcome,
    /// Largest same-team contingent within the cap
    pub single_team: CheckOutcome,
    pub wicketkeepers: CheckOutcome,
    pub bowlers: CheckOutcome,
    pub bowl_capable: CheckOutcome,
    /// Always reported as passed when the league is not domestic
    pub foreign_players: CheckOutcome,
    pub foreign_cap_applies: bool,
}

impl LineupReport {
    /// Whether the lineup may be submitted as a full roster
    pub fn submission_ok(&self) -> bool {
        self.completeness.passed
            && self.vip_quota.passed
            && self.single_team.passed
            && self.wicketkeepers.passed
            && self.bowlers.passed
            && self.bowl_capable.passed
            && self.foreign_players.passed
    }

    /// Whether a like-for-like swap producing this lineup is allowed.
    /// Cardinality and VIP placement are untouched by a swap, so only the
    /// composition checks are consulted.
    pub fn swap_ok(&self) -> bool {
        self.single_team.passed
            && self.wicketkeepers.passed
            && self.bowlers.passed
            && self.bowl_capable.passed
            && self.foreign_players.passed
    }

    /// First violated constraint as a participant-facing message, in the
    /// order the checks are presented during team creation
    pub fn first_violation(&self, rules: &LineupRules) -> Option<String> {
        if !self.completeness.passed {
            return Some(format!(
                "You must select exactly {} players.",
                LINEUP_SIZE
            ));
        }
        if !self.vip_quota.passed {
            return Some(format!(
                "You must select exactly {} VIP players.",
                rules.max_vip_players
            ));
        }
        self.first_swap_violation(rules)
    }

    /// First violated constraint among the checks a swap is judged by;
    /// cardinality and VIP placement are never reported here
    pub fn first_swap_violation(&self, rules: &LineupRules) -> Option<String> {
        if !self.single_team.passed {
            return Some(format!(
                "You can select a maximum of {} players from a single real-life team.",
                rules.max_from_single_team
            ));
        }
        if !self.foreign_players.passed {
            return Some(format!(
                "You can select a maximum of {} foreign players.",
                self.foreign_players.bound
            ));
        }
        if !self.wicketkeepers.passed {
            return Some("You must have at least one Wicketkeeper.".to_string());
        }
        if !self.bowlers.passed {
            return Some("You must have at least two dedicated Bowlers.".to_string());
        }
        if !self.bowl_capable.passed {
            return Some(
                "You must have at least 5 players who can bowl (Bowlers or All-rounders)."
                    .to_string(),
            );
        }
        None
    }
}

/// Evaluate a prospective lineup against the event rules.
///
/// `slots` holds up to eleven entries; `None` marks a slot that is still
/// empty mid-edit.
pub fn evaluate_lineup(slots: &[Option<LineupSlot<'_>>], rules: &LineupRules) -> LineupReport {
    let picked: Vec<&LineupSlot<'_>> = slots.iter().flatten().collect();

    let vip_count = picked.iter().filter(|slot| slot.vip).count();

    let mut per_team: HashMap<&str, usize> = HashMap::new();
    for slot in &picked {
        *per_team.entry(slot.player.team_id().as_str()).or_insert(0) += 1;
    }
    // max over an empty histogram is 0, not an error
    let max_from_team = per_team.values().copied().max().unwrap_or(0);

    let wicketkeeper_count = picked
        .iter()
        .filter(|slot| slot.player.category() == crate::domain::player::PlayerCategory::Wicketkeeper)
        .count();
    let bowler_count = picked
        .iter()
        .filter(|slot| slot.player.category() == crate::domain::player::PlayerCategory::Bowler)
        .count();
    let bowl_capable_count = picked
        .iter()
        .filter(|slot| slot.player.category().is_bowl_capable())
        .count();
    let foreign_count = picked
        .iter()
        .filter(|slot| slot.player.nationality().is_foreign())
        .count();

    let foreign_cap = rules.max_foreign_players.unwrap_or(UNLIMITED_FOREIGN);
    let foreign_players = if rules.domestic {
        CheckOutcome::at_most(foreign_count, foreign_cap)
    } else {
        CheckOutcome::waived(foreign_count, foreign_cap)
    };

    LineupReport {
        completeness: CheckOutcome::exactly(picked.len(), LINEUP_SIZE),
        vip_quota: CheckOutcome::exactly(vip_count, rules.max_vip_players),
        single_team: CheckOutcome::at_most(max_from_team, rules.max_from_single_team),
        wicketkeepers: CheckOutcome::at_least(wicketkeeper_count, WICKETKEEPER_FLOOR),
        bowlers: CheckOutcome::at_least(bowler_count, BOWLER_FLOOR),
        bowl_capable: CheckOutcome::at_least(bowl_capable_count, BOWL_CAPABLE_FLOOR),
        foreign_players,
        foreign_cap_applies: rules.domestic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventId;
    use crate::domain::player::{Nationality, PlayerCategory};
    use crate::domain::team::CricketTeamId;
    use chrono::{Duration, Utc};

    fn rules() -> LineupRules {
        LineupRules {
            max_vip_players: 1,
            max_from_single_team: 4,
            max_foreign_players: Some(4),
            domestic: true,
        }
    }

    fn player(
        team: &CricketTeamId,
        category: PlayerCategory,
        nationality: Nationality,
    ) -> Player {
        Player::new(
            EventId::generate(),
            team.clone(),
            "Team",
            "Player",
            category,
            nationality,
        )
        .unwrap()
    }

    /// A legal eleven: 1 WK, 3 batsmen, 3 all-rounders, 4 bowlers, with at
    /// most four players from any one real-world team and no foreigners
    fn legal_eleven(teams: &[CricketTeamId; 3]) -> Vec<Player> {
        let mut players = Vec::new();
        players.push(player(&teams[0], PlayerCategory::Wicketkeeper, Nationality::Domestic));
        for i in 0..3 {
            players.push(player(&teams[i], PlayerCategory::Batsman, Nationality::Domestic));
        }
        for i in 0..3 {
            players.push(player(&teams[i], PlayerCategory::AllRounder, Nationality::Domestic));
        }
        for i in [0, 1, 2, 1] {
            players.push(player(&teams[i], PlayerCategory::Bowler, Nationality::Domestic));
        }
        players
    }

    fn slots<'a>(players: &'a [Player], vip_index: usize) -> Vec<Option<LineupSlot<'a>>> {
        players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Some(LineupSlot {
                    player: p,
                    vip: i == vip_index,
                })
            })
            .collect()
    }

    fn three_teams() -> [CricketTeamId; 3] {
        [
            CricketTeamId::generate(),
            CricketTeamId::generate(),
            CricketTeamId::generate(),
        ]
    }

    #[test]
    fn test_legal_lineup_passes_everything() {
        let teams = three_teams();
        let players = legal_eleven(&teams);
        let report = evaluate_lineup(&slots(&players, 0), &rules());

        assert!(report.submission_ok());
        assert!(report.swap_ok());
        assert!(report.first_violation(&rules()).is_none());
    }

    #[test]
    fn test_incomplete_lineup_reports_actual_count() {
        let teams = three_teams();
        let players = legal_eleven(&teams);
        let mut lineup = slots(&players, 0);
        lineup[4] = None;
        lineup[7] = None;

        let report = evaluate_lineup(&lineup, &rules());

        assert!(!report.completeness.passed);
        assert_eq!(report.completeness.actual, 9);
        assert_eq!(report.completeness.bound, LINEUP_SIZE);
        assert!(!report.submission_ok());
    }

    #[test]
    fn test_empty_lineup_has_zero_team_maximum() {
        let report = evaluate_lineup(&[], &rules());

        assert_eq!(report.single_team.actual, 0);
        assert!(report.single_team.passed);
        assert_eq!(report.completeness.actual, 0);
    }

    #[test]
    fn test_vip_quota_must_match_exactly() {
        let teams = three_teams();
        let players = legal_eleven(&teams);

        // zero VIPs against a quota of one
        let lineup: Vec<Option<LineupSlot<'_>>> = players
            .iter()
            .map(|p| Some(LineupSlot { player: p, vip: false }))
            .collect();
        let report = evaluate_lineup(&lineup, &rules());
        assert!(!report.vip_quota.passed);
        assert_eq!(report.vip_quota.actual, 0);

        // two VIPs against a quota of one
        let lineup: Vec<Option<LineupSlot<'_>>> = players
            .iter()
            .enumerate()
            .map(|(i, p)| Some(LineupSlot { player: p, vip: i < 2 }))
            .collect();
        let report = evaluate_lineup(&lineup, &rules());
        assert!(!report.vip_quota.passed);
        assert_eq!(report.vip_quota.actual, 2);
    }

    #[test]
    fn test_vip_quota_position_does_not_matter() {
        let teams = three_teams();
        let players = legal_eleven(&teams);

        for vip_index in [0, 5, 10] {
            let report = evaluate_lineup(&slots(&players, vip_index), &rules());
            assert!(report.vip_quota.passed, "vip at index {}", vip_index);
        }
    }

    #[test]
    fn test_single_team_cap_reports_maximum_observed() {
        let team = CricketTeamId::generate();
        let players: Vec<Player> = vec![
            player(&team, PlayerCategory::Batsman, Nationality::Domestic),
            player(&team, PlayerCategory::Batsman, Nationality::Domestic),
            player(&team, PlayerCategory::Batsman, Nationality::Domestic),
        ];
        let lineup: Vec<Option<LineupSlot<'_>>> = players
            .iter()
            .map(|p| Some(LineupSlot { player: p, vip: false }))
            .collect();

        let tight = LineupRules {
            max_from_single_team: 2,
            ..rules()
        };
        let report = evaluate_lineup(&lineup, &tight);

        assert!(!report.single_team.passed);
        assert_eq!(report.single_team.actual, 3);
        assert_eq!(report.single_team.bound, 2);
    }

    #[test]
    fn test_wicketkeeper_floor() {
        let teams = three_teams();
        let mut players = legal_eleven(&teams);
        // demote the only wicketkeeper
        players[0] = player(&teams[0], PlayerCategory::Batsman, Nationality::Domestic);

        let report = evaluate_lineup(&slots(&players, 0), &rules());

        assert!(!report.wicketkeepers.passed);
        assert_eq!(report.wicketkeepers.actual, 0);
        assert!(!report.submission_ok());
    }

    #[test]
    fn test_one_bowler_four_all_rounders() {
        // one dedicated bowler plus four all-rounders: bowl-capable floor is
        // met (5 >= 5) but the dedicated-bowler floor is not (1 < 2)
        let teams = three_teams();
        let mut players = Vec::new();
        players.push(player(&teams[0], PlayerCategory::Wicketkeeper, Nationality::Domestic));
        for i in 0..5 {
            players.push(player(&teams[i % 3], PlayerCategory::Batsman, Nationality::Domestic));
        }
        for i in 0..4 {
            players.push(player(&teams[i % 3], PlayerCategory::AllRounder, Nationality::Domestic));
        }
        players.push(player(&teams[2], PlayerCategory::Bowler, Nationality::Domestic));

        let report = evaluate_lineup(&slots(&players, 0), &rules());

        assert!(!report.bowlers.passed);
        assert_eq!(report.bowlers.actual, 1);
        assert!(report.bowl_capable.passed);
        assert_eq!(report.bowl_capable.actual, 5);
    }

    #[test]
    fn test_foreign_cap_enforced_for_domestic_league() {
        let teams = three_teams();
        let mut players = legal_eleven(&teams);
        for p in players.iter_mut().take(5) {
            p.set_nationality(Nationality::Foreign);
        }

        let report = evaluate_lineup(&slots(&players, 0), &rules());

        assert!(report.foreign_cap_applies);
        assert!(!report.foreign_players.passed);
        assert_eq!(report.foreign_players.actual, 5);
        assert_eq!(report.foreign_players.bound, 4);
    }

    #[test]
    fn test_foreign_cap_waived_for_international_league() {
        let teams = three_teams();
        let mut players = legal_eleven(&teams);
        for p in players.iter_mut() {
            p.set_nationality(Nationality::Foreign);
        }

        let international = LineupRules {
            domestic: false,
            ..rules()
        };
        let report = evaluate_lineup(&slots(&players, 0), &international);

        assert!(!report.foreign_cap_applies);
        assert!(report.foreign_players.passed);
        assert_eq!(report.foreign_players.actual, 11);
    }

    #[test]
    fn test_unset_foreign_cap_is_effectively_unlimited() {
        let teams = three_teams();
        let mut players = legal_eleven(&teams);
        for p in players.iter_mut() {
            p.set_nationality(Nationality::Foreign);
        }

        let uncapped = LineupRules {
            max_foreign_players: None,
            ..rules()
        };
        let report = evaluate_lineup(&slots(&players, 0), &uncapped);

        assert!(report.foreign_players.passed);
        assert_eq!(report.foreign_players.bound, 99);
    }

    #[test]
    fn test_swap_ok_ignores_completeness_and_vip() {
        let teams = three_teams();
        let players = legal_eleven(&teams);
        // no VIP flagged and two batsman slots empty: a swap preview still passes
        let mut lineup: Vec<Option<LineupSlot<'_>>> = players
            .iter()
            .map(|p| Some(LineupSlot { player: p, vip: false }))
            .collect();
        lineup[1] = None;
        lineup[2] = None;

        let report = evaluate_lineup(&lineup, &rules());

        assert!(!report.submission_ok());
        assert!(report.swap_ok());
    }

    #[test]
    fn test_first_swap_violation_ignores_vip() {
        let teams = three_teams();
        let mut players = legal_eleven(&teams);
        // no VIP flagged and no wicketkeeper: a swap complains about the
        // keeper, never about VIP placement
        players[0] = player(&teams[0], PlayerCategory::Batsman, Nationality::Domestic);
        let lineup: Vec<Option<LineupSlot<'_>>> = players
            .iter()
            .map(|p| Some(LineupSlot { player: p, vip: false }))
            .collect();

        let report = evaluate_lineup(&lineup, &rules());

        assert!(!report.vip_quota.passed);
        assert_eq!(
            report.first_swap_violation(&rules()).unwrap(),
            "You must have at least one Wicketkeeper."
        );
    }

    #[test]
    fn test_first_violation_message_order() {
        let teams = three_teams();
        let players = legal_eleven(&teams);
        let mut lineup = slots(&players, 0);
        lineup[1] = None;

        let report = evaluate_lineup(&lineup, &rules());
        assert_eq!(
            report.first_violation(&rules()).unwrap(),
            "You must select exactly 11 players."
        );
    }

    #[test]
    fn test_rules_for_event() {
        let now = Utc::now();
        let event = crate::domain::event::Event::new(
            "Cup",
            crate::domain::event::LeagueType::Domestic,
            now + Duration::days(1),
            now + Duration::days(10),
        )
        .unwrap()
        .with_max_foreign_players(Some(4));

        let rules = LineupRules::for_event(&event);

        assert_eq!(rules.max_vip_players, 1);
        assert_eq!(rules.max_from_single_team, 4);
        assert_eq!(rules.max_foreign_players, Some(4));
        assert!(rules.domestic);
    }
}
