//! SSE broadcaster for real-time session updates

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use ranklab_common::events::SessionEvent;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

use crate::AppState;

/// SSE broadcaster manages client connections and event distribution
#[derive(Clone)]
pub struct SseBroadcaster {
    tx: broadcast::Sender<SessionEvent>,
}

impl SseBroadcaster {
    /// Create a new SSE broadcaster buffering up to `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring if no clients are connected
    pub fn broadcast(&self, event: SessionEvent) {
        if let Ok(count) = self.tx.send(event) {
            debug!("Broadcast session event to {} clients", count);
        }
    }

    /// Current number of connected clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Create an SSE stream for a new client connection
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx);

        stream.filter_map(|result| async move {
            match result {
                Ok(session_event) => {
                    let event = Event::default()
                        .event(session_event.event_name())
                        .json_data(&session_event)
                        .ok();
                    event.map(Ok)
                }
                Err(e) => {
                    // Lagged receiver; log and continue
                    warn!("SSE client error: {:?}", e);
                    None
                }
            }
        })
    }
}

/// GET /api/events - SSE event stream of session state transitions
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        "New SSE client connected, total clients: {}",
        state.events.client_count() + 1
    );

    Sse::new(state.events.subscribe_stream()).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
