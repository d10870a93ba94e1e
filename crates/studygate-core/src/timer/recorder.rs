//! Session recording seam.
//!
//! The timer hands a [`SessionRecord`] to its recorder exactly once per
//! study phase that runs to completion. Stopped sessions are never recorded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// A completed study phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub study_minutes: u32,
    pub break_minutes: u32,
}

/// Persists completed study sessions on behalf of the timer.
pub trait SessionRecorder {
    /// Store one record. Errors are logged by the caller and never stop the
    /// timer from moving on to the break.
    fn record_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError>;
}

impl<R: SessionRecorder + ?Sized> SessionRecorder for Box<R> {
    fn record_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError> {
        (**self).record_session(record)
    }
}

/// Keeps records in memory. Used by hosts that don't persist sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Vec<SessionRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }
}

impl SessionRecorder for MemoryRecorder {
    fn record_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError> {
        self.records.push(*record);
        Ok(())
    }
}
