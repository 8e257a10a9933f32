//! Playback mutual-exclusion gate
//!
//! At most one sample may be playing at any instant. A sample that tries to
//! start while another is active is rejected outright (the browser pauses
//! the element), not queued. Ranking interaction unlocks once every sample
//! of the current trial has been auditioned at least once.

use serde::Serialize;

/// Gate state: idle, or exactly one sample playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "sample")]
pub enum GateState {
    Idle,
    Playing(usize),
}

/// Outcome of a start attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The start was accepted and the sample is now playing
    Started,
    /// Another sample is active; the caller must pause this one
    Rejected,
}

/// Per-trial playback gate
#[derive(Debug, Clone)]
pub struct PlaybackGate {
    state: GateState,
    played: Vec<bool>,
}

impl PlaybackGate {
    pub fn new(samples: usize) -> Self {
        Self {
            state: GateState::Idle,
            played: vec![false; samples],
        }
    }

    /// Re-arm for a new trial: idle, all played flags cleared
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
        for flag in &mut self.played {
            *flag = false;
        }
    }

    /// A sample reported a play start. First-to-start wins; a rejected
    /// start does not mark the blocked sample as played.
    pub fn start(&mut self, sample: usize) -> StartOutcome {
        debug_assert!(sample < self.played.len());
        match self.state {
            GateState::Playing(_) => StartOutcome::Rejected,
            GateState::Idle => {
                self.state = GateState::Playing(sample);
                self.played[sample] = true;
                StartOutcome::Started
            }
        }
    }

    /// The playing sample paused or ended
    pub fn stop(&mut self) {
        self.state = GateState::Idle;
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn played(&self) -> &[bool] {
        &self.played
    }

    /// True once every sample has been auditioned this trial
    pub fn all_played(&self) -> bool {
        self.played.iter().all(|&p| p)
    }
}
