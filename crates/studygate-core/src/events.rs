use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionRecord, TimerPhase};

/// Every state change the host may want to display produces an Event.
/// The host polls for them after each call into the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        study_minutes: u32,
        break_minutes: u32,
        seconds_remaining: u64,
        /// True when the start discarded a session already in progress.
        restarted: bool,
        at: DateTime<Utc>,
    },
    Tick {
        phase: TimerPhase,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    /// Study phase ran out; the break has started.
    StudyCompleted {
        record: SessionRecord,
        /// False when the recorder failed.
        recorded: bool,
        /// Break countdown.
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    BreakEnded {
        at: DateTime<Utc>,
    },
    SessionStopped {
        previous: TimerPhase,
        seconds_remaining: u64,
        at: DateTime<Utc>,
    },
    NavigationBlocked {
        host: String,
        url: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        seconds_remaining: u64,
        study_minutes: Option<u32>,
        break_minutes: Option<u32>,
        label: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The `(phase, seconds_remaining)` pair the host should display after
    /// this event, if the event changes it.
    pub fn phase_state(&self) -> Option<(TimerPhase, u64)> {
        match self {
            Event::SessionStarted {
                seconds_remaining, ..
            } => Some((TimerPhase::Studying, *seconds_remaining)),
            Event::Tick {
                phase,
                seconds_remaining,
                ..
            } => Some((*phase, *seconds_remaining)),
            Event::StudyCompleted {
                seconds_remaining, ..
            } => Some((TimerPhase::OnBreak, *seconds_remaining)),
            Event::BreakEnded { .. } | Event::SessionStopped { .. } => Some((TimerPhase::Idle, 0)),
            Event::StateSnapshot {
                phase,
                seconds_remaining,
                ..
            } => Some((*phase, *seconds_remaining)),
            Event::NavigationBlocked { .. } => None,
        }
    }

    /// True for events that move the timer to another phase.
    pub fn is_phase_change(&self) -> bool {
        matches!(
            self,
            Event::SessionStarted { .. }
                | Event::StudyCompleted { .. }
                | Event::BreakEnded { .. }
                | Event::SessionStopped { .. }
        )
    }
}
