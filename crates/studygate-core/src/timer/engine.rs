//! Study session timer.
//!
//! A countdown state machine driven entirely by the host: it owns no thread
//! and no clock, the caller invokes `tick()` once per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Studying --countdown hits 0--> OnBreak --countdown hits 0--> Idle
//!   ^                 |                              |
//!   +------stop-------+-------------stop-------------+
//! ```
//!
//! `start` is accepted from any state and restarts the study countdown.
//! Reaching the end of a study phase records the session through the
//! injected [`SessionRecorder`]; stopping never does.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new(MemoryRecorder::new());
//! timer.start(SessionConfig::new(25, 5)?);
//! // Once per second:
//! if let Some(event) = timer.tick() { /* update display */ }
//! ```

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::recorder::{SessionRecord, SessionRecorder};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Studying,
    OnBreak,
}

impl TimerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Studying => "studying",
            TimerPhase::OnBreak => "on_break",
        }
    }
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimerPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "idle" => Ok(TimerPhase::Idle),
            "studying" | "study" => Ok(TimerPhase::Studying),
            "on_break" | "break" => Ok(TimerPhase::OnBreak),
            other => Err(format!("unknown phase: {other}")),
        }
    }
}

/// Phase plus the countdown that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Studying {
        seconds_remaining: u64,
        config: SessionConfig,
    },
    OnBreak {
        seconds_remaining: u64,
        config: SessionConfig,
    },
}

impl TimerState {
    pub fn phase(&self) -> TimerPhase {
        match self {
            TimerState::Idle => TimerPhase::Idle,
            TimerState::Studying { .. } => TimerPhase::Studying,
            TimerState::OnBreak { .. } => TimerPhase::OnBreak,
        }
    }

    pub fn seconds_remaining(&self) -> u64 {
        match self {
            TimerState::Idle => 0,
            TimerState::Studying {
                seconds_remaining, ..
            }
            | TimerState::OnBreak {
                seconds_remaining, ..
            } => *seconds_remaining,
        }
    }

    pub fn config(&self) -> Option<SessionConfig> {
        match self {
            TimerState::Idle => None,
            TimerState::Studying { config, .. } | TimerState::OnBreak { config, .. } => {
                Some(*config)
            }
        }
    }

    /// Countdown label, e.g. `"24:59 (Study)"` or `"00:00 (Idle)"`.
    pub fn label(&self) -> String {
        label(self.phase(), self.seconds_remaining())
    }
}

/// Format a `(phase, seconds_remaining)` pair as `"MM:SS (Mode)"`.
pub fn label(phase: TimerPhase, secs: u64) -> String {
    let mode = match phase {
        TimerPhase::Idle => "Idle",
        TimerPhase::Studying => "Study",
        TimerPhase::OnBreak => "Break",
    };
    format!("{:02}:{:02} ({mode})", secs / 60, secs % 60)
}

/// Countdown timer with an injected session recorder.
#[derive(Debug)]
pub struct SessionTimer<R> {
    state: TimerState,
    recorder: R,
    today: fn() -> NaiveDate,
}

impl<R: SessionRecorder> SessionTimer<R> {
    /// Create an idle timer.
    pub fn new(recorder: R) -> Self {
        Self {
            state: TimerState::Idle,
            recorder,
            today: local_today,
        }
    }

    /// Replace the clock used to date session records.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.state.seconds_remaining()
    }

    pub fn label(&self) -> String {
        self.state.label()
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut R {
        &mut self.recorder
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let config = self.state.config();
        Event::StateSnapshot {
            phase: self.phase(),
            seconds_remaining: self.seconds_remaining(),
            study_minutes: config.map(|c| c.study_minutes()),
            break_minutes: config.map(|c| c.break_minutes()),
            label: self.label(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a study phase, discarding any countdown in progress.
    pub fn start(&mut self, config: SessionConfig) -> Event {
        let restarted = self.state != TimerState::Idle;
        self.state = TimerState::Studying {
            seconds_remaining: config.study_secs(),
            config,
        };
        tracing::info!(
            study_minutes = config.study_minutes(),
            break_minutes = config.break_minutes(),
            restarted,
            "study session started"
        );
        Event::SessionStarted {
            study_minutes: config.study_minutes(),
            break_minutes: config.break_minutes(),
            seconds_remaining: config.study_secs(),
            restarted,
            at: Utc::now(),
        }
    }

    /// Return to `Idle` without recording. Returns `None` if already idle.
    pub fn stop(&mut self) -> Option<Event> {
        let previous = self.state;
        if previous == TimerState::Idle {
            return None;
        }
        self.state = TimerState::Idle;
        tracing::info!(phase = %previous.phase(), "session stopped");
        Some(Event::SessionStopped {
            previous: previous.phase(),
            seconds_remaining: previous.seconds_remaining(),
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// The phase changes on the tick that brings the countdown to zero.
    /// Returns `None` while idle.
    pub fn tick(&mut self) -> Option<Event> {
        let phase = self.state.phase();
        let (remaining, config) = match &mut self.state {
            TimerState::Idle => return None,
            TimerState::Studying {
                seconds_remaining,
                config,
            }
            | TimerState::OnBreak {
                seconds_remaining,
                config,
            } => {
                *seconds_remaining = seconds_remaining.saturating_sub(1);
                (*seconds_remaining, *config)
            }
        };

        if remaining > 0 {
            return Some(Event::Tick {
                phase,
                seconds_remaining: remaining,
                at: Utc::now(),
            });
        }

        match phase {
            TimerPhase::Studying => Some(self.complete_study(config)),
            _ => {
                self.state = TimerState::Idle;
                tracing::info!("break finished");
                Some(Event::BreakEnded { at: Utc::now() })
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_study(&mut self, config: SessionConfig) -> Event {
        let record = SessionRecord {
            date: (self.today)(),
            study_minutes: config.study_minutes(),
            break_minutes: config.break_minutes(),
        };
        let recorded = match self.recorder.record_session(&record) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "failed to record study session");
                false
            }
        };

        self.state = TimerState::OnBreak {
            seconds_remaining: config.break_secs(),
            config,
        };
        tracing::info!(recorded, "study phase complete, break started");
        Event::StudyCompleted {
            record,
            recorded,
            seconds_remaining: config.break_secs(),
            at: Utc::now(),
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
