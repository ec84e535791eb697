//! Application services - one per collection, plus cross-collection rules

pub mod announcement_service;
pub mod chat_service;
pub mod event_service;
pub mod history_service;
pub mod player_service;
pub mod replacement_service;
pub mod roster_service;
pub mod settings_service;
pub mod standings_service;
pub mod team_service;
pub mod user_service;

pub use announcement_service::AnnouncementService;
pub use chat_service::ChatService;
pub use event_service::{CreateEventRequest, EventService, UpdateEventRequest};
pub use history_service::{HistoryService, SeasonRecordRequest};
pub use player_service::{CreatePlayerRequest, PlayerService, UpdatePlayerRequest};
pub use replacement_service::{ReplacementService, SubmitReplacementRequest};
pub use roster_service::{RosterService, SaveRosterRequest, SlotSelection};
pub use settings_service::SettingsService;
pub use standings_service::StandingsService;
pub use team_service::{CreateTeamRequest, TeamService, UpdateTeamRequest};
pub use user_service::{RegisterUserRequest, UpdateUserRequest, UserService};
