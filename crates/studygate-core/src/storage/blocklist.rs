//! Blocklist persistence.
//!
//! The blocklist lives in a JSON array of lowercase domain strings
//! (`blocked_sites.json` in the data directory by default). The file is
//! seeded with [`DEFAULT_BLOCKED_DOMAINS`] the first time it is read, and
//! any read or parse failure falls back to that same default set so the
//! host never loses gating because of a broken file.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StorageError;
use crate::gate::normalize_host;

pub const DEFAULT_BLOCKED_DOMAINS: [&str; 5] = [
    "instagram.com",
    "youtube.com",
    "facebook.com",
    "whatsapp.com",
    "tiktok.com",
];

pub const BLOCKLIST_FILE: &str = "blocked_sites.json";

/// Normalize a raw blocklist entry. Returns `None` for entries that are
/// empty after trimming.
pub fn normalize(raw: &str) -> Option<String> {
    let entry = normalize_host(raw);
    if entry.is_empty() {
        None
    } else {
        Some(entry)
    }
}

/// Ordered set of normalized domains.
///
/// Insertion order is kept for persistence; matching ignores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Blocklist {
    entries: IndexSet<String>,
}

impl Blocklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five-site default seed.
    pub fn default_set() -> Self {
        DEFAULT_BLOCKED_DOMAINS.iter().copied().collect()
    }

    /// Insert a raw entry. Returns true if it was new.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(entry) => self.entries.insert(entry),
            None => false,
        }
    }

    /// Remove a raw entry. Returns true if it was present.
    pub fn remove(&mut self, raw: &str) -> bool {
        match normalize(raw) {
            Some(entry) => self.entries.shift_remove(&entry),
            None => false,
        }
    }

    pub fn contains(&self, raw: &str) -> bool {
        normalize(raw).is_some_and(|entry| self.entries.contains(&entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blocklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Blocklist::new();
        for raw in iter {
            list.insert(raw.as_ref());
        }
        list
    }
}

/// Deserialization normalizes every entry and drops blank ones.
impl<'de> Deserialize<'de> for Blocklist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

/// File-backed blocklist storage.
#[derive(Debug, Clone)]
pub struct BlocklistStore {
    path: PathBuf,
}

impl BlocklistStore {
    /// Store at `<data_dir>/blocked_sites.json`.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::DataDir(e.to_string()))?;
        Ok(Self::with_path(dir.join(BLOCKLIST_FILE)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the blocklist, seeding or repairing the file as needed.
    ///
    /// Never fails: a missing or corrupt file is replaced by the default
    /// set, and if that write fails too the default set is returned from
    /// memory only.
    pub fn load(&self) -> Blocklist {
        match self.try_load() {
            Ok(list) => list,
            Err(StorageError::Missing(_)) => {
                tracing::info!(path = %self.path.display(), "seeding default blocklist");
                self.seed_default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "blocklist unreadable, falling back to defaults");
                self.seed_default()
            }
        }
    }

    /// Strict load: reports every failure instead of recovering.
    pub fn try_load(&self) -> Result<Blocklist, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.clone()));
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        // Non-string elements are dropped silently.
        Ok(raw.iter().filter_map(serde_json::Value::as_str).collect())
    }

    /// Persist the blocklist in insertion order.
    pub fn save(&self, list: &Blocklist) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(list).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(write_err)
    }

    /// Add an entry and persist. Returns true if the list changed.
    ///
    /// A failed write is logged; the in-memory list keeps the new entry.
    pub fn add(&self, list: &mut Blocklist, raw: &str) -> bool {
        let changed = list.insert(raw);
        if changed {
            self.persist(list);
        }
        changed
    }

    /// Remove an entry and persist. Returns true if the list changed.
    pub fn remove(&self, list: &mut Blocklist, raw: &str) -> bool {
        let changed = list.remove(raw);
        if changed {
            self.persist(list);
        }
        changed
    }

    /// Replace the list with the default set and persist.
    pub fn reset(&self, list: &mut Blocklist) {
        *list = Blocklist::default_set();
        self.persist(list);
    }

    fn seed_default(&self) -> Blocklist {
        let list = Blocklist::default_set();
        self.persist(&list);
        list
    }

    fn persist(&self, list: &Blocklist) {
        if let Err(e) = self.save(list) {
            tracing::warn!(error = %e, "failed to persist blocklist, keeping in-memory copy");
        }
    }
}
