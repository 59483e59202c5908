//! Core data models for analysis-gate
//!
//! Verdicts and the auxiliary results produced by the validator. All of
//! them are built fresh per call and serialize to the JSON shape the
//! surrounding service hands back to its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation tier a verdict was issued at
///
/// The first four are threshold profiles, ordered strictest first. The
/// last two are synthetic verdicts that bypass the profile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationLevel {
    Strict,
    Moderate,
    Flexible,
    Emergency,
    EmergencyOverride,
    ForcedPass,
}

impl ValidationLevel {
    /// Rank used by `--fail-below`: higher is better.
    /// The override ranks below every profile.
    pub fn rank(&self) -> Option<u8> {
        match self {
            ValidationLevel::Strict => Some(4),
            ValidationLevel::Moderate => Some(3),
            ValidationLevel::Flexible => Some(2),
            ValidationLevel::Emergency => Some(1),
            ValidationLevel::EmergencyOverride => Some(0),
            ValidationLevel::ForcedPass => None,
        }
    }

    /// Whether this level names one of the four threshold profiles
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            ValidationLevel::Strict
                | ValidationLevel::Moderate
                | ValidationLevel::Flexible
                | ValidationLevel::Emergency
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Strict => "STRICT",
            ValidationLevel::Moderate => "MODERATE",
            ValidationLevel::Flexible => "FLEXIBLE",
            ValidationLevel::Emergency => "EMERGENCY",
            ValidationLevel::EmergencyOverride => "EMERGENCY_OVERRIDE",
            ValidationLevel::ForcedPass => "FORCED_PASS",
        }
    }
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValidationLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "STRICT" => Ok(ValidationLevel::Strict),
            "MODERATE" => Ok(ValidationLevel::Moderate),
            "FLEXIBLE" => Ok(ValidationLevel::Flexible),
            "EMERGENCY" => Ok(ValidationLevel::Emergency),
            "EMERGENCY_OVERRIDE" => Ok(ValidationLevel::EmergencyOverride),
            "FORCED_PASS" => Ok(ValidationLevel::ForcedPass),
            _ => Err(anyhow::anyhow!(
                "Unknown level '{}'. Valid levels: strict, moderate, flexible, emergency",
                s
            )),
        }
    }
}

/// The five component scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub structure: f64,
    pub research: f64,
    pub avatar: f64,
    pub insights: f64,
    pub simulation: f64,
}

impl ComponentScores {
    /// Every dimension set to the same value (override / forced verdicts)
    pub fn uniform(value: f64) -> Self {
        Self {
            structure: value,
            research: value,
            avatar: value,
            insights: value,
            simulation: value,
        }
    }

    /// Clamp every dimension into [0, 100]
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) };
        Self {
            structure: c(self.structure),
            research: c(self.research),
            avatar: c(self.avatar),
            insights: c(self.insights),
            simulation: c(self.simulation),
        }
    }

    /// Named view, in reporting order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("structure", self.structure),
            ("research", self.research),
            ("avatar", self.avatar),
            ("insights", self.insights),
            ("simulation", self.simulation),
        ]
    }

    /// Overall quality: plain mean of the five dimensions
    pub fn mean(&self) -> f64 {
        self.entries().iter().map(|(_, v)| v).sum::<f64>() / 5.0
    }
}

/// Record of one profile tried during progressive validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelAttempt {
    pub level: ValidationLevel,
    pub accepted: bool,
    pub quality_score: f64,
    /// Threshold the score was compared with
    pub min_quality_score: f64,
    /// Rejection reason; empty when accepted
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Outcome of a validation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub level: ValidationLevel,
    pub quality_score: f64,
    pub component_scores: ComponentScores,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub primary_reason: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub emergency_mode: bool,
    #[serde(default)]
    pub forced: bool,
    /// Always true: downstream processing is never blocked
    pub can_continue: bool,
    pub data_preserved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Profiles tried before this verdict was reached
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<LevelAttempt>,
    pub timestamp: DateTime<Utc>,
}

/// Whether an analysis carries enough content for a PDF report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfEligibility {
    pub eligible: bool,
    pub reason: String,
}

/// Result of scoring one analysis component in isolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCheck {
    pub component: String,
    pub valid: bool,
    pub score: f64,
    pub reason: String,
    /// Always true: a weak component never blocks the analysis
    pub can_continue: bool,
    pub recommendation: String,
}

/// Bookkeeping attached to a cleaned analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningMetadata {
    pub cleaned_at: DateTime<Utc>,
    pub cleaning_level: String,
    /// Serialized size in bytes before cleaning
    pub original_size: usize,
    /// Serialized size in bytes after cleaning
    pub cleaned_size: usize,
    pub data_preserved: bool,
    pub simulation_tolerance: String,
}

/// A cleaned analysis plus its cleaning metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedAnalysis {
    pub analysis: crate::Analysis,
    pub validation_metadata: CleaningMetadata,
}

impl CleanedAnalysis {
    /// Flatten into one document with `validation_metadata` as a top-level key
    pub fn into_document(self) -> crate::Analysis {
        let mut doc = self.analysis;
        // CleaningMetadata only holds plain fields; serialization cannot fail
        if let Ok(meta) = serde_json::to_value(&self.validation_metadata) {
            doc.insert("validation_metadata".to_string(), meta);
        }
        doc
    }
}

/// Thresholds of one profile, as reported by `stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub level: ValidationLevel,
    pub min_content_length: u64,
    pub min_sources: u64,
    pub min_insights: u64,
    pub min_quality_score: f64,
    pub simulation_tolerance: u64,
}

/// Static description of what the validator can do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub available_levels: Vec<ValidationLevel>,
    pub level_thresholds: Vec<LevelThresholds>,
    pub emergency_mode_available: bool,
    pub forced_pass_available: bool,
}
