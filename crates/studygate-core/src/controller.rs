//! Host-facing session controller.
//!
//! Bundles the session timer, the in-memory blocklist and its store behind
//! the operations a browser shell needs: start/stop a session, ask whether a
//! navigation may proceed, edit and reload the blocklist, and drive the
//! once-per-second tick. Events produced along the way are queued and
//! drained by the host with [`SessionController::poll_events`].

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;

use crate::error::ConfigError;
use crate::events::Event;
use crate::gate::{self, GateSnapshot, Verdict};
use crate::storage::{Blocklist, BlocklistStore};
use crate::timer::{SessionConfig, SessionRecorder, SessionTimer, TimerPhase};

pub struct SessionController<R> {
    timer: SessionTimer<R>,
    store: BlocklistStore,
    blocklist: Arc<Blocklist>,
    events: VecDeque<Event>,
}

impl<R: SessionRecorder> SessionController<R> {
    /// Build a controller, loading the blocklist from `store`.
    pub fn new(recorder: R, store: BlocklistStore) -> Self {
        Self::with_timer(SessionTimer::new(recorder), store)
    }

    pub fn with_timer(timer: SessionTimer<R>, store: BlocklistStore) -> Self {
        let blocklist = Arc::new(store.load());
        Self {
            timer,
            store,
            blocklist,
            events: VecDeque::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    pub fn timer(&self) -> &SessionTimer<R> {
        &self.timer
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn store(&self) -> &BlocklistStore {
        &self.store
    }

    /// Phase and blocklist frozen for readers on other threads.
    pub fn gate_snapshot(&self) -> GateSnapshot {
        GateSnapshot::new(self.timer.phase(), Arc::clone(&self.blocklist))
    }

    /// Queue and return a state snapshot.
    pub fn snapshot(&mut self) -> Event {
        let event = self.timer.snapshot();
        self.events.push_back(event.clone());
        event
    }

    /// Drain queued events, oldest first.
    pub fn poll_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Start (or restart) a study session.
    ///
    /// Invalid durations are rejected and the current session is untouched.
    pub fn start_session(&mut self, study_minutes: u32, break_minutes: u32) -> Result<(), ConfigError> {
        let config = SessionConfig::new(study_minutes, break_minutes)?;
        let event = self.timer.start(config);
        self.events.push_back(event);
        Ok(())
    }

    /// Stop the session. Safe to call in any phase.
    pub fn stop_session(&mut self) {
        if let Some(event) = self.timer.stop() {
            self.events.push_back(event);
        }
    }

    /// Advance the timer by one second.
    pub fn tick(&mut self) {
        if let Some(event) = self.timer.tick() {
            self.events.push_back(event);
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Decide whether `url` may be loaded now. A denial queues a
    /// `NavigationBlocked` notice; the caller must not load the page.
    pub fn attempt_navigation(&mut self, url: &str) -> Verdict {
        let verdict = gate::evaluate_url(url, self.timer.phase(), &self.blocklist);
        if let Verdict::Deny { host } = &verdict {
            self.events.push_back(Event::NavigationBlocked {
                host: host.clone(),
                url: url.trim().to_string(),
                at: Utc::now(),
            });
        }
        verdict
    }

    // ── Blocklist ────────────────────────────────────────────────────

    /// Re-read the blocklist from storage.
    pub fn reload_blocklist(&mut self) {
        self.blocklist = Arc::new(self.store.load());
        tracing::debug!(entries = self.blocklist.len(), "blocklist reloaded");
    }

    /// Add a domain and persist. Returns true if it was new.
    pub fn add_blocked_domain(&mut self, raw: &str) -> bool {
        self.store.add(Arc::make_mut(&mut self.blocklist), raw)
    }

    /// Remove a domain and persist. Returns true if it was present.
    pub fn remove_blocked_domain(&mut self, raw: &str) -> bool {
        self.store.remove(Arc::make_mut(&mut self.blocklist), raw)
    }

    /// Restore the default blocklist and persist it.
    pub fn reset_blocklist(&mut self) {
        self.store.reset(Arc::make_mut(&mut self.blocklist));
    }
}
