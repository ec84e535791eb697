//! Administrator API
//!
//! Every route requires a session whose account has the admin role.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::api::state::AppState;

pub mod announcements;
pub mod events;
pub mod history;
pub mod players;
pub mod replacements;
pub mod rosters;
pub mod settings;
pub mod teams;
pub mod users;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Events
        .route("/events", post(events::create_event))
        .route(
            "/events/{event_id}",
            put(events::update_event).delete(events::delete_event),
        )
        // Real-world teams
        .route("/teams", post(teams::create_team))
        .route(
            "/teams/{team_id}",
            put(teams::update_team).delete(teams::delete_team),
        )
        // Players and score entry
        .route("/players", post(players::create_player))
        .route("/players/bulk", post(players::create_players_bulk))
        .route(
            "/players/{player_id}",
            put(players::update_player).delete(players::delete_player),
        )
        .route("/players/{player_id}/points", put(players::set_points))
        // Rosters
        .route(
            "/rosters/{roster_id}/archived-points",
            put(rosters::set_archived_points),
        )
        // Replacement review
        .route("/replacements/pending", get(replacements::list_pending))
        .route(
            "/replacements/{request_id}/accept",
            post(replacements::accept),
        )
        .route(
            "/replacements/{request_id}/reject",
            post(replacements::reject),
        )
        // Announcements
        .route("/announcements", post(announcements::create))
        .route(
            "/announcements/{announcement_id}",
            delete(announcements::delete),
        )
        // Accounts
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", put(users::update_user))
        // Site settings
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        // Season history
        .route("/history", post(history::add_record))
        .route(
            "/history/{record_id}",
            put(history::update_record).delete(history::delete_record),
        )
}
