//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::JwtService;
use crate::infrastructure::notify::ChangeFeed;
use crate::infrastructure::services::{
    AnnouncementService, ChatService, EventService, HistoryService, PlayerService,
    ReplacementService, RosterService, SettingsService, StandingsService, TeamService,
    UserService,
};

/// Everything a handler can reach; cloning is cheap (all fields are Arcs)
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub event_service: Arc<EventService>,
    pub team_service: Arc<TeamService>,
    pub player_service: Arc<PlayerService>,
    pub roster_service: Arc<RosterService>,
    pub replacement_service: Arc<ReplacementService>,
    pub standings_service: Arc<StandingsService>,
    pub announcement_service: Arc<AnnouncementService>,
    pub chat_service: Arc<ChatService>,
    pub history_service: Arc<HistoryService>,
    pub settings_service: Arc<SettingsService>,
    pub jwt_service: Arc<JwtService>,
    pub change_feed: Arc<ChangeFeed>,
}
