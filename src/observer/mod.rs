//! Validation observers
//!
//! The validator reports every profile attempt and every terminal outcome
//! (emergency override, forced pass) to its registered observers. Observers
//! are side channels: a failing observer is logged and otherwise ignored.

mod journal;

pub use journal::{session_dir, JournalEntry, JournalObserver};

use crate::models::{LevelAttempt, Verdict};
use serde::Serialize;
use thiserror::Error;

/// Errors an observer can report back to the validator
#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Something worth recording during validation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ValidationEvent<'a> {
    /// One profile was tried
    Attempt(&'a LevelAttempt),
    /// Every profile rejected; the override verdict was issued
    EmergencyOverride(&'a Verdict),
    /// An operator forced the verdict
    ForcedPass(&'a Verdict),
}

impl ValidationEvent<'_> {
    /// Stable step name, e.g. `attempt_moderate`
    pub fn step_name(&self) -> String {
        match self {
            ValidationEvent::Attempt(a) => format!("attempt_{}", a.level.as_str().to_lowercase()),
            ValidationEvent::EmergencyOverride(_) => "emergency_override".to_string(),
            ValidationEvent::ForcedPass(_) => "forced_pass".to_string(),
        }
    }
}

/// Common interface for validation observers
pub trait ValidationObserver: Send + Sync {
    /// Name of this observer (for logging)
    fn name(&self) -> &str;

    /// Record one event
    fn record(
        &self,
        event: &ValidationEvent<'_>,
        session_id: Option<&str>,
    ) -> Result<(), ObserverError>;
}

/// Emits one structured log line per event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ValidationObserver for TracingObserver {
    fn name(&self) -> &str {
        "tracing"
    }

    fn record(
        &self,
        event: &ValidationEvent<'_>,
        session_id: Option<&str>,
    ) -> Result<(), ObserverError> {
        let session = session_id.unwrap_or("-");
        match event {
            ValidationEvent::Attempt(a) => tracing::info!(
                session = session,
                level = a.level.as_str(),
                accepted = a.accepted,
                quality_score = a.quality_score,
                "validation attempt"
            ),
            ValidationEvent::EmergencyOverride(v) | ValidationEvent::ForcedPass(v) => {
                tracing::warn!(
                    session = session,
                    level = v.level.as_str(),
                    quality_score = v.quality_score,
                    reason = v.primary_reason.as_str(),
                    "validation outcome"
                )
            }
        }
        Ok(())
    }
}
