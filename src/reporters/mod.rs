//! Output reporters for validation results
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors and optional emoji
//! - `json` - Machine-readable JSON

mod json;
mod text;

pub use text::TextOptions;

use crate::models::{ComponentCheck, PdfEligibility, ValidationStats, Verdict};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a verdict in the specified format
pub fn report(verdict: &Verdict, format: OutputFormat, options: &TextOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_verdict(verdict, options)),
        OutputFormat::Json => json::render(verdict),
    }
}

/// Render the level table
pub fn report_stats(
    stats: &ValidationStats,
    format: OutputFormat,
    options: &TextOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_stats(stats, options)),
        OutputFormat::Json => json::render(stats),
    }
}

/// Render a PDF eligibility decision
pub fn report_pdf(
    pdf: &PdfEligibility,
    format: OutputFormat,
    options: &TextOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_pdf(pdf, options)),
        OutputFormat::Json => json::render(pdf),
    }
}

/// Render a single-component check
pub fn report_component(
    check: &ComponentCheck,
    format: OutputFormat,
    options: &TextOptions,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_component(check, options)),
        OutputFormat::Json => json::render(check),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ComponentScores, LevelAttempt, ValidationLevel};
    use chrono::Utc;

    /// A verdict accepted at MODERATE after STRICT rejected
    pub(crate) fn test_verdict() -> Verdict {
        Verdict {
            valid: true,
            level: ValidationLevel::Moderate,
            quality_score: 64.0,
            component_scores: ComponentScores {
                structure: 80.0,
                research: 60.0,
                avatar: 40.0,
                insights: 40.0,
                simulation: 100.0,
            },
            errors: Vec::new(),
            warnings: Vec::new(),
            primary_reason: "Score 64.0% >= 60.0%".into(),
            recommendation: "Good quality, with minor gaps".into(),
            emergency_mode: false,
            forced: false,
            can_continue: true,
            data_preserved: true,
            session_id: Some("session_1700000000_abcd1234".into()),
            attempts: vec![
                LevelAttempt {
                    level: ValidationLevel::Strict,
                    accepted: false,
                    quality_score: 58.0,
                    min_quality_score: 80.0,
                    reason: "Score 58.0% < 80.0%".into(),
                    errors: Vec::new(),
                },
                LevelAttempt {
                    level: ValidationLevel::Moderate,
                    accepted: true,
                    quality_score: 64.0,
                    min_quality_score: 60.0,
                    reason: String::new(),
                    errors: Vec::new(),
                },
            ],
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_report_dispatch() {
        let verdict = test_verdict();
        let options = TextOptions::plain();

        let json_out = report(&verdict, OutputFormat::Json, &options).unwrap();
        assert!(json_out.trim_start().starts_with('{'));

        let text_out = report(&verdict, OutputFormat::Text, &options).unwrap();
        assert!(text_out.contains("MODERATE"));
    }
}
