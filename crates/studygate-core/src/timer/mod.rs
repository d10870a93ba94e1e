mod config;
mod engine;
mod recorder;

pub use config::{SessionConfig, MAX_BREAK_MINUTES, MAX_STUDY_MINUTES, MIN_MINUTES};
pub(crate) use config::check_range;
pub use engine::{label, SessionTimer, TimerPhase, TimerState};
pub use recorder::{MemoryRecorder, SessionRecord, SessionRecorder};
