//! Change feed
//!
//! After every successful mutation a service publishes which collection
//! changed — nothing more. Subscribers (the SSE endpoint) forward the
//! signal and clients re-fetch what they care about; there is no payload
//! diffing. A lagging subscriber misses signals and simply re-fetches on
//! the next one it sees.

use serde::Serialize;
use tokio::sync::broadcast;

/// Channel depth; signals are tiny and stale ones are harmless
const FEED_CAPACITY: usize = 64;

/// The named collections of the league store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Events,
    Teams,
    Players,
    Rosters,
    ReplacementRequests,
    Announcements,
    ChatMessages,
    SeasonHistory,
    SiteSettings,
}

impl Collection {
    /// Stable name, also used as the Postgres table name
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Events => "events",
            Self::Teams => "teams",
            Self::Players => "players",
            Self::Rosters => "rosters",
            Self::ReplacementRequests => "replacement_requests",
            Self::Announcements => "announcements",
            Self::ChatMessages => "chat_messages",
            Self::SeasonHistory => "season_history",
            Self::SiteSettings => "site_settings",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A "something changed" signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollectionChange {
    pub collection: Collection,
}

/// Broadcast hub for change signals
#[derive(Debug)]
pub struct ChangeFeed {
    tx: broadcast::Sender<CollectionChange>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Announce a mutation. With no subscribers the signal is dropped,
    /// which is fine: nobody was listening.
    pub fn publish(&self, collection: Collection) {
        let _ = self.tx.send(CollectionChange { collection });
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CollectionChange> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
