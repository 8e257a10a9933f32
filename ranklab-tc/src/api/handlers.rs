//! HTTP request handlers
//!
//! REST endpoints the browser UI reports its discrete events through:
//! playback start/stop, ranking drops and resets, and trial submission.
//! Every handler takes a short critical section on the shared session.

use crate::session::{DropResult, SessionSnapshot, StartOutcome, SubmitOutcome};
use crate::submit::write_local_copy;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use ranklab_common::events::SessionEvent;
use ranklab_common::Error;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayStartedRequest {
    /// Player position reporting the start
    sample: usize,
}

#[derive(Debug, Serialize)]
pub struct PlayStartedResponse {
    /// False means another sample is playing and this one must pause
    accepted: bool,
    ranking_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct DropRequest {
    slot: usize,
    label: String,
}

#[derive(Debug, Serialize)]
pub struct DropResponse {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    submit_eligible: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    status: String,
    run_complete: bool,
    /// Trial index after the submission
    trial: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
}

type HandlerError = (StatusCode, Json<StatusResponse>);

fn error_response(e: Error) -> HandlerError {
    let status = match &e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::InvalidState(_) => StatusCode::CONFLICT,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(StatusResponse {
            status: format!("error: {}", e),
        }),
    )
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "trial_controller".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Session State
// ============================================================================

/// GET /api/state - Full session snapshot
pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let session = state.session.read().await;
    Json(session.snapshot())
}

// ============================================================================
// Playback Gate Endpoints
// ============================================================================

/// POST /api/playback/started - A player reported a play start
///
/// A rejected start (another sample active) is a normal outcome, not an
/// error: the response tells the browser to pause the element.
pub async fn playback_started(
    State(state): State<AppState>,
    Json(req): Json<PlayStartedRequest>,
) -> Result<Json<PlayStartedResponse>, HandlerError> {
    let mut session = state.session.write().await;
    let result = session.play_started(req.sample).map_err(error_response)?;
    let ranking_enabled = session.snapshot().ranking_enabled;
    let trial = session.trial();
    drop(session);

    if result.outcome == StartOutcome::Started {
        state.events.broadcast(SessionEvent::PlaybackStarted {
            sample: req.sample,
            timestamp: chrono::Utc::now(),
        });
    }
    if result.ranking_enabled_now {
        state.events.broadcast(SessionEvent::RankingEnabled {
            trial,
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(PlayStartedResponse {
        accepted: result.outcome == StartOutcome::Started,
        ranking_enabled,
    }))
}

/// POST /api/playback/stopped - The playing sample paused or ended
pub async fn playback_stopped(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, HandlerError> {
    let mut session = state.session.write().await;
    let was_playing = session.play_stopped();
    drop(session);

    if was_playing {
        state.events.broadcast(SessionEvent::PlaybackStopped {
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(StatusResponse {
        status: "ok".to_string(),
    }))
}

// ============================================================================
// Ranking Endpoints
// ============================================================================

/// POST /api/ranking/drop - Place an item label into a ranking slot
///
/// Duplicate placement and drops while ranking is disabled are silently
/// rejected (accepted: false), matching the no-op contract.
pub async fn ranking_drop(
    State(state): State<AppState>,
    Json(req): Json<DropRequest>,
) -> Result<Json<DropResponse>, HandlerError> {
    let mut session = state.session.write().await;
    let result = session.place(req.slot, &req.label).map_err(error_response)?;
    let submit_eligible = session.snapshot().submit_eligible;
    drop(session);

    let (accepted, reason) = match result {
        DropResult::Placed { .. } => (true, None),
        DropResult::Duplicate => (false, Some("already_placed")),
        DropResult::Disabled => (false, Some("ranking_disabled")),
    };

    if accepted {
        state.events.broadcast(SessionEvent::SlotAssigned {
            slot: req.slot,
            label: req.label,
            submit_eligible,
            timestamp: chrono::Utc::now(),
        });
    }

    Ok(Json(DropResponse {
        accepted,
        reason,
        submit_eligible,
    }))
}

/// POST /api/ranking/reset - Clear every ranking slot
pub async fn ranking_reset(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, HandlerError> {
    let mut session = state.session.write().await;
    session.reset_ranking().map_err(error_response)?;
    drop(session);

    state.events.broadcast(SessionEvent::RankingReset {
        timestamp: chrono::Utc::now(),
    });

    Ok(Json(StatusResponse {
        status: "ok".to_string(),
    }))
}

// ============================================================================
// Submission Endpoint
// ============================================================================

/// POST /api/submit - Record the current ranking and advance the trial
///
/// On the final trial this builds the results CSV, writes the local copy,
/// and triggers delivery to the external submission endpoint.
pub async fn submit_ranking(
    State(state): State<AppState>,
) -> Result<Json<SubmitResponse>, HandlerError> {
    let mut session = state.session.write().await;
    let outcome = session.submit().map_err(error_response)?;
    let session_id = session.session_id();
    let total = session.total_trials();
    let snapshot = session.snapshot();
    drop(session);

    match outcome {
        SubmitOutcome::Advanced { trial } => {
            state.events.broadcast(SessionEvent::TrialAdvanced {
                trial,
                total,
                timestamp: chrono::Utc::now(),
            });
            state.events.broadcast(SessionEvent::TrialLoaded {
                trial,
                total,
                emotion: snapshot.emotion.to_string(),
                timestamp: chrono::Utc::now(),
            });

            Ok(Json(SubmitResponse {
                status: "ok".to_string(),
                run_complete: false,
                trial,
                total,
                filename: None,
            }))
        }
        SubmitOutcome::Finished(report) => {
            info!("Finalizing run {}: {}", session_id, report.filename);

            // Local copy first; an unreachable endpoint must not lose the run
            if let Err(e) = write_local_copy(&state.settings.local_log_dir(), &report) {
                error!("Failed to write local results copy: {}", e);
            }

            state.events.broadcast(SessionEvent::RunCompleted {
                session_id,
                filename: report.filename.clone(),
                trials: report.trials,
                timestamp: chrono::Utc::now(),
            });

            let filename = report.filename.clone();
            let submitter = state.submitter.clone();
            // Delivery is fire-and-forget; the contract ends here
            tokio::spawn(async move {
                submitter.deliver(&report).await;
            });

            Ok(Json(SubmitResponse {
                status: "ok".to_string(),
                run_complete: true,
                trial: total,
                total,
                filename: Some(filename),
            }))
        }
    }
}
