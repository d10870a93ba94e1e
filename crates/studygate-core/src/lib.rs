//! # studygate Core Library
//!
//! Navigation gating for a study browser. While a Pomodoro-style study
//! phase is running, navigation to blocklisted domains is denied; during
//! breaks and while idle everything is allowed.
//!
//! ## Architecture
//!
//! - **Timer**: a countdown state machine (`Idle -> Studying -> OnBreak -> Idle`)
//!   that requires the host to invoke `tick()` once per second
//! - **Gate**: pure allow/deny decisions from the timer phase and blocklist
//! - **Storage**: JSON blocklist file, SQLite session records and TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: Study/break state machine
//! - [`SessionController`]: Host-facing facade with an event queue
//! - [`BlocklistStore`]: Blocklist persistence with default seeding
//! - [`Database`]: Completed session persistence

pub mod controller;
pub mod error;
pub mod events;
pub mod gate;
pub mod storage;
pub mod timer;

pub use controller::SessionController;
pub use error::{
    ConfigError, CoreError, NavigationParseError, PersistenceError, Result, StorageError,
};
pub use events::Event;
pub use gate::{decide, evaluate_url, matches, normalize_host, GateSnapshot, Verdict};
pub use storage::{Blocklist, BlocklistStore, Config, Database, DEFAULT_BLOCKED_DOMAINS};
pub use timer::{
    label, MemoryRecorder, SessionConfig, SessionRecord, SessionRecorder, SessionTimer, TimerPhase,
    TimerState,
};
