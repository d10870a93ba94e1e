pub mod blocklist;
pub mod check;
pub mod config;
pub mod history;
pub mod session;

use studygate_core::{BlocklistStore, Config, Database};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Blocklist store at the configured location.
fn open_store(config: &Config) -> studygate_core::Result<BlocklistStore> {
    Ok(BlocklistStore::with_path(config.blocklist_path()?))
}

/// Session database at the configured location.
fn open_database(config: &Config) -> studygate_core::Result<Database> {
    Ok(Database::open_at(config.database_path()?)?)
}
