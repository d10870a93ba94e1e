//! SQLite storage for completed study sessions.
//!
//! Shares the `study_sessions` table layout with the to-do web app:
//! `(id, date, study_minutes, break_minutes)`, dates as `%Y-%m-%d`.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::PersistenceError;
use crate::timer::{SessionRecord, SessionRecorder};

pub const DATABASE_FILE: &str = "productivity.db";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A session row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: i64,
    pub date: NaiveDate,
    pub study_minutes: u32,
    pub break_minutes: u32,
}

/// SQLite database for session storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/productivity.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, PersistenceError> {
        let dir = data_dir().map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
        Self::open_at(dir.join(DATABASE_FILE))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS study_sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                date          TEXT,
                study_minutes INTEGER,
                break_minutes INTEGER
            );",
        )
    }

    /// Insert a completed session. Returns the new row id.
    pub fn insert_session(&self, record: &SessionRecord) -> Result<i64, PersistenceError> {
        self.conn.execute(
            "INSERT INTO study_sessions (date, study_minutes, break_minutes) VALUES (?1, ?2, ?3)",
            params![
                record.date.format(DATE_FORMAT).to_string(),
                record.study_minutes,
                record.break_minutes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All stored sessions, oldest first. Rows with unparsable dates are skipped.
    pub fn sessions(&self) -> Result<Vec<StoredSession>, PersistenceError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, study_minutes, break_minutes
             FROM study_sessions
             ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<u32>>(2)?,
                row.get::<_, Option<u32>>(3)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, date, study, brk) = row?;
            let Some(date) = date.and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok())
            else {
                tracing::debug!(id, "skipping session row with invalid date");
                continue;
            };
            sessions.push(StoredSession {
                id,
                date,
                study_minutes: study.unwrap_or(0),
                break_minutes: brk.unwrap_or(0),
            });
        }
        Ok(sessions)
    }
}

impl SessionRecorder for Database {
    fn record_session(&mut self, record: &SessionRecord) -> Result<(), PersistenceError> {
        let id = self.insert_session(record)?;
        tracing::debug!(id, date = %record.date, "session recorded");
        Ok(())
    }
}
