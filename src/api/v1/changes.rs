//! Change feed endpoint
//!
//! A server-sent-events stream of collection-changed signals. Events carry
//! only the collection name; consumers re-fetch whatever they care about.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;

/// GET /v1/changes
pub async fn stream(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.change_feed.subscribe();

    // a lagging subscriber drops signals; that is fine, the next signal
    // triggers the same re-fetch
    let stream = BroadcastStream::new(receiver)
        .filter_map(|change| change.ok())
        .map(|change| {
            Ok(Event::default()
                .event("change")
                .data(change.collection.table_name()))
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
