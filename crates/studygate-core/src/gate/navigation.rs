//! Allow/deny decisions for navigation attempts.
//!
//! Gating is only active while the timer is in the study phase. The
//! decision is recomputed on every call; nothing is cached across phase
//! changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use super::matcher::matches;
use crate::error::NavigationParseError;
use crate::storage::Blocklist;
use crate::timer::TimerPhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    /// The host must not be loaded; the caller suppresses the navigation.
    Deny { host: String },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// Decide whether `target_host` may be loaded in `phase`.
pub fn decide(target_host: &str, phase: TimerPhase, blocklist: &Blocklist) -> Verdict {
    if phase != TimerPhase::Studying {
        return Verdict::Allow;
    }
    match blocklist.iter().find(|entry| matches(target_host, entry)) {
        Some(entry) => {
            tracing::debug!(host = target_host, entry, "navigation denied");
            Verdict::Deny {
                host: target_host.to_string(),
            }
        }
        None => Verdict::Allow,
    }
}

/// Turn address-bar input into an absolute URL. Input that does not start
/// with a scheme is treated as `https://`.
pub fn normalize_address(input: &str) -> Result<String, NavigationParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(NavigationParseError::Empty);
    }
    if has_scheme(input) {
        Ok(input.to_string())
    } else {
        Ok(format!("https://{input}"))
    }
}

/// True when `input` opens with `scheme://`. A `://` later in the path or
/// query does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Extract the host of a navigation target.
pub fn target_host(input: &str) -> Result<String, NavigationParseError> {
    let address = normalize_address(input)?;
    let url = Url::parse(&address).map_err(|source| NavigationParseError::InvalidUrl {
        input: input.to_string(),
        source,
    })?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(NavigationParseError::MissingHost(input.to_string())),
    }
}

/// Decide for a full URL. Targets that can't be parsed are allowed.
pub fn evaluate_url(input: &str, phase: TimerPhase, blocklist: &Blocklist) -> Verdict {
    match target_host(input) {
        Ok(host) => decide(&host, phase, blocklist),
        Err(e) => {
            tracing::warn!(error = %e, "cannot evaluate navigation target, allowing");
            Verdict::Allow
        }
    }
}

/// Immutable phase + blocklist pair for lock-free reads from other threads.
#[derive(Debug, Clone)]
pub struct GateSnapshot {
    phase: TimerPhase,
    blocklist: Arc<Blocklist>,
}

impl GateSnapshot {
    pub fn new(phase: TimerPhase, blocklist: Arc<Blocklist>) -> Self {
        Self { phase, blocklist }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn decide(&self, target_host: &str) -> Verdict {
        decide(target_host, self.phase, &self.blocklist)
    }

    pub fn evaluate_url(&self, input: &str) -> Verdict {
        evaluate_url(input, self.phase, &self.blocklist)
    }
}
