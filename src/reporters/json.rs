//! JSON reporter
//!
//! Pretty-printed JSON of any result type, for piping to jq or
//! handing back to the orchestrator.

use anyhow::Result;
use serde::Serialize;

/// Render as pretty JSON
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
