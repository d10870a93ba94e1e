//! TOML-based application configuration.
//!
//! Stores:
//! - Default study and break lengths offered when a session starts
//! - The home page the browser shell opens
//! - Optional overrides for the blocklist and database locations
//!
//! Configuration is stored at `~/.config/studygate/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::blocklist::BLOCKLIST_FILE;
use super::data_dir;
use super::database::DATABASE_FILE;
use crate::error::ConfigError;
use crate::timer::{check_range, SessionConfig, MAX_BREAK_MINUTES, MAX_STUDY_MINUTES};

/// Durations pre-filled for new sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_study_minutes")]
    pub study_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Browser shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_home_url")]
    pub home_url: String,
}

/// File location overrides. Empty means "use the data directory".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoragePaths {
    #[serde(default)]
    pub blocklist_path: String,
    #[serde(default)]
    pub database_path: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studygate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionDefaults,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub storage: StoragePaths,
}

fn default_study_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_home_url() -> String {
    "https://www.google.com".into()
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            study_minutes: default_study_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::path()?)
    }

    /// Same as [`Config::load`] for an explicit file.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(&path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check the session defaults are usable durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("study_minutes", self.session.study_minutes, MAX_STUDY_MINUTES)?;
        check_range("break_minutes", self.session.break_minutes, MAX_BREAK_MINUTES)
    }

    /// The configured defaults as a session config.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::new(self.session.study_minutes, self.session.break_minutes)
    }

    /// Blocklist file location, honoring the override.
    pub fn blocklist_path(&self) -> std::io::Result<PathBuf> {
        resolve(&self.storage.blocklist_path, BLOCKLIST_FILE)
    }

    /// Database file location, honoring the override.
    pub fn database_path(&self) -> std::io::Result<PathBuf> {
        resolve(&self.storage.database_path, DATABASE_FILE)
    }
}

fn resolve(configured: &str, file_name: &str) -> std::io::Result<PathBuf> {
    let configured = configured.trim();
    if configured.is_empty() {
        Ok(data_dir()?.join(file_name))
    } else {
        Ok(PathBuf::from(configured))
    }
}
