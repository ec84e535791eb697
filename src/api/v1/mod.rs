//! Participant-facing API
//!
//! Everything here requires a session except the public announcement list;
//! administrator-only mutations live under /admin.

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

pub mod announcements;
pub mod changes;
pub mod chat;
pub mod events;
pub mod history;
pub mod replacements;
pub mod rosters;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events))
        .route("/events/{event_id}", get(events::get_event))
        .route("/events/{event_id}/teams", get(events::list_teams))
        .route("/events/{event_id}/players", get(events::list_players))
        .route("/events/{event_id}/standings", get(events::standings))
        .route("/events/{event_id}/rosters", get(rosters::list_rosters))
        .route(
            "/events/{event_id}/roster",
            get(rosters::my_roster)
                .post(rosters::create_roster)
                .put(rosters::update_roster),
        )
        .route(
            "/events/{event_id}/roster/validate",
            post(rosters::validate_roster),
        )
        .route(
            "/rosters/{roster_id}/replacements",
            get(replacements::list_for_roster),
        )
        .route("/replacements", post(replacements::submit))
        .route("/announcements", get(announcements::list))
        .route("/announcements/public", get(announcements::list_public))
        .route("/history", get(history::list))
        .route("/chat", get(chat::conversation).post(chat::send))
        .route("/chat/read", post(chat::mark_read))
        .route("/changes", get(changes::stream))
}
