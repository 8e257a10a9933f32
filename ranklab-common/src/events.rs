//! Event types for the RankLab session event system
//!
//! Every state transition in the trial controller emits one of these events.
//! They are broadcast to connected browsers over SSE so the UI can mirror
//! the authoritative server-side session state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A trial's players and condition have been (re)loaded
    TrialLoaded {
        trial: usize,
        total: usize,
        emotion: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A sample started playing (the gate accepted the start)
    PlaybackStarted {
        sample: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The currently playing sample paused or ended
    PlaybackStopped {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// All samples of the current trial have been auditioned;
    /// ranking interaction is now enabled
    RankingEnabled {
        trial: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A label was placed into a ranking slot
    SlotAssigned {
        slot: usize,
        label: String,
        submit_eligible: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// All ranking slots were cleared
    RankingReset {
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A ranking was recorded and the session advanced to the next trial
    TrialAdvanced {
        trial: usize,
        total: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// The final ranking was recorded; results were serialized and
    /// delivery was triggered
    RunCompleted {
        session_id: Uuid,
        filename: String,
        trials: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl SessionEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_name(&self) -> &'static str {
        match self {
            SessionEvent::TrialLoaded { .. } => "TrialLoaded",
            SessionEvent::PlaybackStarted { .. } => "PlaybackStarted",
            SessionEvent::PlaybackStopped { .. } => "PlaybackStopped",
            SessionEvent::RankingEnabled { .. } => "RankingEnabled",
            SessionEvent::SlotAssigned { .. } => "SlotAssigned",
            SessionEvent::RankingReset { .. } => "RankingReset",
            SessionEvent::TrialAdvanced { .. } => "TrialAdvanced",
            SessionEvent::RunCompleted { .. } => "RunCompleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_type_tag() {
        let event = SessionEvent::PlaybackStarted {
            sample: 3,
            timestamp: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PlaybackStarted");
        assert_eq!(json["sample"], 3);
    }

    #[test]
    fn event_name_matches_variant() {
        let event = SessionEvent::RankingReset {
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(event.event_name(), "RankingReset");
    }
}
