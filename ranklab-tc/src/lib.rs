//! ranklab-tc (Trial Controller) - Listening-test session microservice
//!
//! Owns the authoritative state of one experiment run (trial counter,
//! condition draw, playback gate, ranking board, rankings log), serves the
//! browser UI and audio assets, and finalizes the run to CSV with delivery
//! to an external submission endpoint.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

pub mod api;
pub mod report;
pub mod session;
pub mod submit;

use api::SseBroadcaster;
use ranklab_common::Settings;
use session::RunSession;
use submit::SubmissionClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single experiment session behind a write lock; every state
    /// transition is a short critical section in one handler
    pub session: Arc<RwLock<RunSession>>,
    /// SSE fan-out of session events to connected browsers
    pub events: SseBroadcaster,
    /// Client for the external submission endpoint
    pub submitter: Arc<SubmissionClient>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state for a new run
    pub fn new(settings: Settings) -> Self {
        let session = RunSession::new(&settings);
        Self::with_session(settings, session)
    }

    /// Create application state around a pre-built session (deterministic
    /// tests seed the RNG)
    pub fn with_session(settings: Settings, session: RunSession) -> Self {
        let submitter = SubmissionClient::new(
            settings.submit_url.clone(),
            settings.log_dir.clone(),
        );
        Self {
            session: Arc::new(RwLock::new(session)),
            events: SseBroadcaster::new(100),
            submitter: Arc::new(submitter),
            settings: Arc::new(settings),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let audio_dir = state.settings.audio_dir();

    Router::new()
        // Browser UI (embedded assets)
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        // Health endpoint
        .route("/health", get(api::health))
        // Session API
        .route("/api/state", get(api::get_state))
        .route("/api/playback/started", post(api::playback_started))
        .route("/api/playback/stopped", post(api::playback_stopped))
        .route("/api/ranking/drop", post(api::ranking_drop))
        .route("/api/ranking/reset", post(api::ranking_reset))
        .route("/api/submit", post(api::submit_ranking))
        .route("/api/events", get(api::event_stream))
        // Audio assets; resolution/existence is the asset tree's problem
        .nest_service("/audio", ServeDir::new(audio_dir))
        .with_state(state)
}
