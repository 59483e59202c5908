//! File journal - one JSON file per validation event
//!
//! Layout: `<root>/<session>/<timestamp>_<seq>_<step>.json`. Events without
//! a session land in `<root>/no-session/`.

use super::{ObserverError, ValidationEvent, ValidationObserver};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Category recorded on every entry
const CATEGORY: &str = "validation";

/// One journal file
#[derive(Debug, Serialize)]
pub struct JournalEntry<'a> {
    pub step: String,
    pub category: &'static str,
    pub session_id: Option<&'a str>,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: &'a ValidationEvent<'a>,
}

/// Writes each event as a pretty-printed JSON file under a root directory
pub struct JournalObserver {
    root: PathBuf,
    seq: AtomicU64,
}

impl JournalObserver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ValidationObserver for JournalObserver {
    fn name(&self) -> &str {
        "journal"
    }

    fn record(
        &self,
        event: &ValidationEvent<'_>,
        session_id: Option<&str>,
    ) -> Result<(), ObserverError> {
        let dir = session_dir(&self.root, session_id);
        std::fs::create_dir_all(&dir)?;

        let recorded_at = Utc::now();
        let step = event.step_name();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let file_name = format!(
            "{}_{:04}_{}.json",
            recorded_at.format("%Y%m%dT%H%M%S%.6f"),
            seq,
            step
        );

        let entry = JournalEntry {
            step,
            category: CATEGORY,
            session_id,
            recorded_at,
            event,
        };
        let json = serde_json::to_string_pretty(&entry)?;
        std::fs::write(dir.join(&file_name), json)?;

        tracing::debug!("Journaled {}", dir.join(&file_name).display());
        Ok(())
    }
}

/// Directory for one session's entries.
/// The session id is reduced to a safe file name component.
pub fn session_dir(root: &Path, session_id: Option<&str>) -> PathBuf {
    let name: String = session_id
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(64)
        .collect();

    if name.is_empty() {
        root.join("no-session")
    } else {
        root.join(name)
    }
}
