//! Participant rosters: the eleven-player selection, the eligibility
//! ruleset, and points/standings computation

pub mod entity;
pub mod scoring;
pub mod validation;

pub use entity::{Roster, RosterError, RosterId, RosterSlot};
pub use scoring::{
    compute_standings, player_total, points_table, rank_of, roster_total, StandingRow,
};
pub use validation::{
    evaluate_lineup, CheckOutcome, LineupReport, LineupRules, LineupSlot, LINEUP_SIZE,
};
