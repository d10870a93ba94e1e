mod blocklist;
mod config;
pub mod database;

pub use blocklist::{normalize, Blocklist, BlocklistStore, BLOCKLIST_FILE, DEFAULT_BLOCKED_DOMAINS};
pub use config::{BrowserConfig, Config, SessionDefaults, StoragePaths};
pub use database::{Database, StoredSession};

use std::path::PathBuf;

/// Returns `~/.config/studygate[-dev]/` based on STUDYGATE_ENV.
///
/// Set STUDYGATE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYGATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studygate-dev")
    } else {
        base_dir.join("studygate")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
