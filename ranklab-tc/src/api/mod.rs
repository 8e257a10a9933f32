//! HTTP API handlers for ranklab-tc

pub mod handlers;
pub mod sse;
pub mod ui;

pub use handlers::{
    get_state, health, playback_started, playback_stopped, ranking_drop, ranking_reset,
    submit_ranking,
};
pub use sse::{event_stream, SseBroadcaster};
pub use ui::{serve_app_js, serve_index};
