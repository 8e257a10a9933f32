//! Run session: the trial controller's authoritative state
//!
//! Owns the trial counter, the current trial's condition and presentation
//! order, the playback gate, the ranking board, and the accumulated
//! rankings log. Every state transition of the experiment happens through
//! the methods here, inside one handler's critical section, so the event
//! handling stays effectively single-threaded.

pub mod gate;
pub mod ranking;
pub mod trial;

pub use gate::{GateState, PlaybackGate, StartOutcome};
pub use ranking::{DropOutcome, RankingBoard};
pub use trial::{Condition, Emotion, TrialPlan};

use crate::report;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ranklab_common::config::{ConditionRanges, Settings};
use ranklab_common::{time, Error, Result};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Result of a reported play start
#[derive(Debug, Clone, Copy)]
pub struct PlayStartResult {
    pub outcome: StartOutcome,
    /// True exactly when this start satisfied the all-played condition
    pub ranking_enabled_now: bool,
}

/// Result of a drop attempt routed through the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    /// Written into the slot; carries the re-derived submission eligibility
    Placed { submit_eligible: bool },
    /// Label already occupies a slot; no state change
    Duplicate,
    /// Ranking not yet enabled for this trial; no state change
    Disabled,
}

/// Result of a submission
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Ranking recorded; the next trial has been loaded
    Advanced { trial: usize },
    /// Ranking recorded; the run is complete and the report is ready
    Finished(RunReport),
}

/// Finalized run output, ready for delivery
#[derive(Debug, Clone)]
pub struct RunReport {
    pub filename: String,
    pub csv: String,
    pub trials: usize,
}

/// Serializable snapshot of the session, served to the browser
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    /// 0-based trial index; equals `total` once the run is complete
    pub trial: usize,
    /// 1-based ordinal for the `Question <i>/<total>` display
    pub question: usize,
    pub total: usize,
    pub emotion: &'static str,
    /// Item labels the listener ranks (player positions, in order)
    pub items: Vec<String>,
    /// Resource key per player position
    pub resource_keys: Vec<String>,
    pub played: Vec<bool>,
    pub gate: GateState,
    pub ranking_enabled: bool,
    pub slots: Vec<Option<String>>,
    pub submit_eligible: bool,
    pub complete: bool,
}

/// Authoritative session state for one experiment run
pub struct RunSession {
    session_id: Uuid,
    trials: usize,
    samples: usize,
    ranges: ConditionRanges,
    trial: usize,
    plan: TrialPlan,
    gate: PlaybackGate,
    board: RankingBoard,
    ranking_enabled: bool,
    rankings: Vec<Vec<String>>,
    complete: bool,
    rng: StdRng,
}

impl RunSession {
    /// Start a run at trial 0 with an entropy-seeded RNG
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Start a run at trial 0 with a caller-provided RNG (deterministic tests)
    pub fn with_rng(settings: &Settings, rng: StdRng) -> Self {
        let mut session = Self {
            session_id: Uuid::new_v4(),
            trials: settings.trials,
            samples: settings.samples,
            ranges: settings.ranges.clone(),
            trial: 0,
            plan: TrialPlan {
                condition: Condition {
                    speaker_id: 0,
                    text_id: 0,
                    emotion_id: 0,
                },
                order: Vec::new(),
            },
            gate: PlaybackGate::new(settings.samples),
            board: RankingBoard::new(settings.samples),
            ranking_enabled: false,
            rankings: Vec::new(),
            complete: false,
            rng,
        };
        session.load_trial();
        info!(
            "Session {} started: {} trials, {} samples per trial",
            session.session_id, session.trials, session.samples
        );
        session
    }

    /// Draw a fresh condition and permutation, re-arm the gate, clear the
    /// ranking board, and disable submission
    fn load_trial(&mut self) {
        self.plan = TrialPlan::draw(&mut self.rng, &self.ranges, self.samples);
        self.gate.reset();
        self.board.reset();
        self.ranking_enabled = false;
        info!(
            "Trial {}/{} loaded: emotion {}, presentation order {:?}",
            self.trial + 1,
            self.trials,
            self.plan.condition.emotion(),
            self.plan.order
        );
    }

    /// A player reported a play start
    pub fn play_started(&mut self, sample: usize) -> Result<PlayStartResult> {
        self.ensure_active()?;
        if sample >= self.samples {
            return Err(Error::InvalidInput(format!(
                "sample index {} out of range (samples = {})",
                sample, self.samples
            )));
        }

        let outcome = self.gate.start(sample);
        let mut ranking_enabled_now = false;
        if outcome == StartOutcome::Started
            && !self.ranking_enabled
            && self.gate.all_played()
        {
            self.ranking_enabled = true;
            ranking_enabled_now = true;
            info!("Trial {}: all samples auditioned, ranking enabled", self.trial + 1);
        }
        debug!("Play start for sample {}: {:?}", sample, outcome);

        Ok(PlayStartResult {
            outcome,
            ranking_enabled_now,
        })
    }

    /// The playing sample paused or ended. Harmless after run completion
    /// (a final `ended` event may race the last submission). Returns true
    /// when a playing sample was actually stopped.
    pub fn play_stopped(&mut self) -> bool {
        if self.complete {
            return false;
        }
        let was_playing = matches!(self.gate.state(), GateState::Playing(_));
        self.gate.stop();
        was_playing
    }

    /// Drop `label` into `slot`
    pub fn place(&mut self, slot: usize, label: &str) -> Result<DropResult> {
        self.ensure_active()?;
        if slot >= self.board.len() {
            return Err(Error::InvalidInput(format!(
                "slot index {} out of range (slots = {})",
                slot,
                self.board.len()
            )));
        }
        if !self.is_known_label(label) {
            return Err(Error::InvalidInput(format!("unknown item label: {label}")));
        }
        if !self.ranking_enabled {
            // Dragging a disabled item is a no-op
            return Ok(DropResult::Disabled);
        }

        match self.board.place(slot, label) {
            DropOutcome::Placed => Ok(DropResult::Placed {
                submit_eligible: self.board.is_complete(),
            }),
            DropOutcome::Duplicate => Ok(DropResult::Duplicate),
        }
    }

    /// Clear every slot; submission becomes ineligible
    pub fn reset_ranking(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.board.reset();
        debug!("Trial {}: ranking reset", self.trial + 1);
        Ok(())
    }

    /// Record the current slot contents and advance the trial; on the last
    /// trial, finalize the run and hand back the report.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.ensure_active()?;
        let labels = self.board.labels().ok_or_else(|| {
            Error::InvalidState("ranking incomplete: all slots must be filled".to_string())
        })?;

        info!("Trial {}/{} submitted: {:?}", self.trial + 1, self.trials, labels);
        self.rankings.push(labels);
        self.trial += 1;

        if self.trial < self.trials {
            self.load_trial();
            Ok(SubmitOutcome::Advanced { trial: self.trial })
        } else {
            self.complete = true;
            let csv = report::build_csv(&self.rankings, self.samples);
            let filename = time::results_filename_now();
            info!(
                "Run complete: {} trials recorded, results file {}",
                self.rankings.len(),
                filename
            );
            Ok(SubmitOutcome::Finished(RunReport {
                filename,
                csv,
                trials: self.rankings.len(),
            }))
        }
    }

    /// Snapshot for the state endpoint
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id,
            trial: self.trial,
            question: (self.trial + 1).min(self.trials),
            total: self.trials,
            emotion: self.plan.condition.emotion().name(),
            items: (0..self.samples).map(|i| i.to_string()).collect(),
            resource_keys: self.plan.resource_keys(),
            played: self.gate.played().to_vec(),
            gate: self.gate.state(),
            ranking_enabled: self.ranking_enabled,
            slots: self.board.slots().to_vec(),
            submit_eligible: self.ranking_enabled && self.board.is_complete(),
            complete: self.complete,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn trial(&self) -> usize {
        self.trial
    }

    pub fn total_trials(&self) -> usize {
        self.trials
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_plan(&self) -> &TrialPlan {
        &self.plan
    }

    pub fn rankings(&self) -> &[Vec<String>] {
        &self.rankings
    }

    /// Item labels are the player positions rendered as strings
    fn is_known_label(&self, label: &str) -> bool {
        label
            .parse::<usize>()
            .map(|v| v < self.samples)
            .unwrap_or(false)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.complete {
            Err(Error::InvalidState("run already complete".to_string()))
        } else {
            Ok(())
        }
    }
}
