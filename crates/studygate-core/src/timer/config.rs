use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_STUDY_MINUTES: u32 = 180;
pub const MAX_BREAK_MINUTES: u32 = 60;

/// Study and break lengths captured when a session starts.
///
/// Only constructible through [`SessionConfig::new`], so a value of this type
/// always holds positive, in-range durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    study_minutes: u32,
    break_minutes: u32,
}

impl SessionConfig {
    pub fn new(study_minutes: u32, break_minutes: u32) -> Result<Self, ConfigError> {
        check_range("study_minutes", study_minutes, MAX_STUDY_MINUTES)?;
        check_range("break_minutes", break_minutes, MAX_BREAK_MINUTES)?;
        Ok(Self {
            study_minutes,
            break_minutes,
        })
    }

    pub fn study_minutes(&self) -> u32 {
        self.study_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn study_secs(&self) -> u64 {
        u64::from(self.study_minutes) * 60
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            study_minutes: 25,
            break_minutes: 5,
        }
    }
}

/// Deserialization goes through validation.
impl<'de> Deserialize<'de> for SessionConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            study_minutes: u32,
            break_minutes: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        SessionConfig::new(raw.study_minutes, raw.break_minutes).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if (MIN_MINUTES..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration {
            field,
            value,
            min: MIN_MINUTES,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_durations() {
        let config = SessionConfig::new(25, 5).unwrap();
        assert_eq!(config.study_secs(), 1500);
        assert_eq!(config.break_secs(), 300);
    }

    #[test]
    fn rejects_zero_minutes() {
        assert!(matches!(
            SessionConfig::new(0, 5),
            Err(ConfigError::InvalidDuration { field: "study_minutes", .. })
        ));
        assert!(matches!(
            SessionConfig::new(25, 0),
            Err(ConfigError::InvalidDuration { field: "break_minutes", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_minutes() {
        assert!(SessionConfig::new(181, 5).is_err());
        assert!(SessionConfig::new(25, 61).is_err());
        assert!(SessionConfig::new(180, 60).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let ok: SessionConfig =
            serde_json::from_str(r#"{"study_minutes":50,"break_minutes":10}"#).unwrap();
        assert_eq!(ok.study_minutes(), 50);
        assert!(serde_json::from_str::<SessionConfig>(r#"{"study_minutes":0,"break_minutes":10}"#)
            .is_err());
    }
}
