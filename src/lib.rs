//! Fantasy Cricket League API
//!
//! Backend for a fantasy cricket league: participants build an
//! eleven-player roster under eligibility rules, accrue points from
//! real-world performance, swap players through administrator-reviewed
//! replacement requests, and exchange announcements and messages with the
//! administrator.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use api::state::AppState;
use domain::announcement::Announcement;
use domain::chat::ChatMessage;
use domain::event::Event;
use domain::history::SeasonRecord;
use domain::player::Player;
use domain::replacement::ReplacementRequest;
use domain::roster::Roster;
use domain::settings::SiteSettings;
use domain::storage::{Storage, StorageEntity};
use domain::team::CricketTeam;
use domain::user::{User, UserRole};
use infrastructure::auth::{Argon2Hasher, JwtConfig, JwtService};
use infrastructure::notify::{ChangeFeed, Collection};
use infrastructure::services::{
    AnnouncementService, ChatService, EventService, HistoryService, PlayerService,
    RegisterUserRequest, ReplacementService, RosterService, SettingsService, StandingsService,
    TeamService, UserService,
};
use infrastructure::storage::{InMemoryStorage, PostgresConfig, PostgresStorage};

/// One storage handle per league collection
struct Collections {
    users: Arc<dyn Storage<User>>,
    events: Arc<dyn Storage<Event>>,
    teams: Arc<dyn Storage<CricketTeam>>,
    players: Arc<dyn Storage<Player>>,
    rosters: Arc<dyn Storage<Roster>>,
    replacements: Arc<dyn Storage<ReplacementRequest>>,
    announcements: Arc<dyn Storage<Announcement>>,
    chat_messages: Arc<dyn Storage<ChatMessage>>,
    history: Arc<dyn Storage<SeasonRecord>>,
    settings: Arc<dyn Storage<SiteSettings>>,
}

impl Collections {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStorage::new()),
            events: Arc::new(InMemoryStorage::new()),
            teams: Arc::new(InMemoryStorage::new()),
            players: Arc::new(InMemoryStorage::new()),
            rosters: Arc::new(InMemoryStorage::new()),
            replacements: Arc::new(InMemoryStorage::new()),
            announcements: Arc::new(InMemoryStorage::new()),
            chat_messages: Arc::new(InMemoryStorage::new()),
            history: Arc::new(InMemoryStorage::new()),
            settings: Arc::new(InMemoryStorage::new()),
        }
    }

    async fn postgres() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;

        info!("Connecting to PostgreSQL...");
        let pool = PostgresConfig::new(database_url).connect().await?;
        info!("PostgreSQL connection established");

        Ok(Self {
            users: postgres_storage(&pool, Collection::Users).await?,
            events: postgres_storage(&pool, Collection::Events).await?,
            teams: postgres_storage(&pool, Collection::Teams).await?,
            players: postgres_storage(&pool, Collection::Players).await?,
            rosters: postgres_storage(&pool, Collection::Rosters).await?,
            replacements: postgres_storage(&pool, Collection::ReplacementRequests).await?,
            announcements: postgres_storage(&pool, Collection::Announcements).await?,
            chat_messages: postgres_storage(&pool, Collection::ChatMessages).await?,
            history: postgres_storage(&pool, Collection::SeasonHistory).await?,
            settings: postgres_storage(&pool, Collection::SiteSettings).await?,
        })
    }
}

async fn postgres_storage<E>(
    pool: &sqlx::PgPool,
    collection: Collection,
) -> anyhow::Result<Arc<dyn Storage<E>>>
where
    E: StorageEntity + 'static,
{
    let storage = PostgresStorage::new(pool.clone(), collection.table_name());
    storage.ensure_table().await?;
    Ok(Arc::new(storage))
}

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let collections = match config.storage.backend.as_str() {
        "postgres" => {
            info!("Storage backend: postgres");
            Collections::postgres().await?
        }
        other => {
            if other != "memory" {
                tracing::warn!(
                    "Unknown storage backend '{}', falling back to in-memory",
                    other
                );
            }
            info!("Storage backend: in-memory");
            Collections::in_memory()
        }
    };

    let feed = Arc::new(ChangeFeed::new());
    let hasher = Arc::new(Argon2Hasher::new());

    let user_service = Arc::new(UserService::new(
        collections.users.clone(),
        hasher,
        feed.clone(),
    ));
    let event_service = Arc::new(EventService::new(
        collections.events.clone(),
        collections.teams.clone(),
        collections.players.clone(),
        collections.rosters.clone(),
        feed.clone(),
    ));
    let team_service = Arc::new(TeamService::new(
        collections.teams.clone(),
        collections.events.clone(),
        feed.clone(),
    ));
    let player_service = Arc::new(PlayerService::new(
        collections.players.clone(),
        collections.teams.clone(),
        feed.clone(),
    ));
    let roster_service = Arc::new(RosterService::new(
        collections.rosters.clone(),
        collections.events.clone(),
        collections.players.clone(),
        collections.settings.clone(),
        feed.clone(),
    ));
    let replacement_service = Arc::new(ReplacementService::new(
        collections.replacements.clone(),
        collections.rosters.clone(),
        collections.events.clone(),
        collections.players.clone(),
        feed.clone(),
    ));
    let standings_service = Arc::new(StandingsService::new(
        collections.events.clone(),
        collections.rosters.clone(),
        collections.players.clone(),
    ));
    let announcement_service = Arc::new(AnnouncementService::new(
        collections.announcements.clone(),
        feed.clone(),
    ));
    let chat_service = Arc::new(ChatService::new(
        collections.chat_messages.clone(),
        collections.users.clone(),
        feed.clone(),
    ));
    let history_service = Arc::new(HistoryService::new(
        collections.history.clone(),
        feed.clone(),
    ));
    let settings_service = Arc::new(SettingsService::new(
        collections.settings.clone(),
        feed.clone(),
    ));

    let jwt_service = Arc::new(create_jwt_service(config));

    create_initial_admin_user(&user_service).await?;

    Ok(AppState {
        user_service,
        event_service,
        team_service,
        player_service,
        roster_service,
        replacement_service,
        standings_service,
        announcement_service,
        chat_service,
        history_service,
        settings_service,
        jwt_service,
        change_feed: feed,
    })
}

/// JWT service from the configured secret, the JWT_SECRET environment
/// variable, or a freshly generated one (sessions then die with the
/// process)
fn create_jwt_service(config: &AppConfig) -> JwtService {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No JWT secret configured. Generating a random one; \
                sessions will NOT survive a restart."
            );
            generate_random_secret()
        });

    JwtService::new(JwtConfig::new(secret, config.auth.jwt_expiration_hours))
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

fn generate_random_password() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Seed an administrator account on first start, so the league can be
/// configured at all
async fn create_initial_admin_user(user_service: &UserService) -> anyhow::Result<()> {
    if user_service.count().await? > 0 {
        return Ok(());
    }

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@cricket.local".to_string());
    let (password, from_env) = match std::env::var("ADMIN_DEFAULT_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, true),
        _ => (generate_random_password(), false),
    };

    user_service
        .create_with_role(
            RegisterUserRequest {
                full_name: "League Administrator".to_string(),
                email: email.clone(),
                password: password.clone(),
                social_link: None,
            },
            UserRole::Admin,
        )
        .await?;

    info!("===========================================");
    info!("Initial admin account created!");
    info!("Email: {}", email);
    if from_env {
        info!("Password: (set via ADMIN_DEFAULT_PASSWORD)");
    } else {
        info!("Password: {}", password);
    }
    info!("Please change this password after first login.");
    info!("===========================================");

    Ok(())
}
