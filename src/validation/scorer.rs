//! Component scorers
//!
//! Each scorer reads one area of the analysis and returns 0-100. Missing
//! or oddly-typed sections lower the score; they never fail the scorer.
//! The few genuine faults (nothing to score, an insight without a length,
//! a serialization failure) surface as `ScoringError` and reject only the
//! profile being tried.

use super::profile::ThresholdProfile;
use super::sections::{has_section, is_present, is_substantial, measure, number};
use crate::config::ValidatorConfig;
use crate::models::ComponentScores;
use crate::Analysis;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Points for the essential sections of the structure score
const ESSENTIAL_POINTS: f64 = 50.0;
/// Points shared by the optional sections of the structure score
const OPTIONAL_POINTS: f64 = 50.0;

const RESEARCH_BASE: f64 = 20.0;
const RESEARCH_CONTENT_POINTS: f64 = 30.0;
const RESEARCH_SOURCE_POINTS: f64 = 30.0;
const RESEARCH_QUALITY_POINTS: f64 = 20.0;

const AVATAR_BASE: f64 = 20.0;
const AVATAR_SUBSECTION_POINTS: f64 = 80.0;
/// Strings at most this long do not count as a filled avatar subsection
const AVATAR_MIN_TEXT_CHARS: usize = 10;

const INSIGHTS_BASE: f64 = 10.0;
const INSIGHTS_COUNT_POINTS: f64 = 50.0;
const INSIGHTS_DEPTH_POINTS: f64 = 40.0;
/// Insights longer than this count as substantial
const SUBSTANTIAL_INSIGHT_CHARS: usize = 50;

/// Faults that reject the profile being tried
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("analysis is empty; nothing to score")]
    EmptyAnalysis,

    #[error("insight #{index} has no measurable length ({kind})")]
    UnmeasurableInsight { index: usize, kind: &'static str },

    #[error("cannot serialize analysis: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Scores one analysis against the configured section layout
pub struct ComponentScorer<'a> {
    analysis: &'a Analysis,
    config: &'a ValidatorConfig,
}

impl<'a> ComponentScorer<'a> {
    pub fn new(analysis: &'a Analysis, config: &'a ValidatorConfig) -> Self {
        Self { analysis, config }
    }

    /// All five component scores under one profile, each clamped to [0, 100]
    pub fn score(&self, profile: &ThresholdProfile) -> Result<ComponentScores, ScoringError> {
        if self.analysis.is_empty() {
            return Err(ScoringError::EmptyAnalysis);
        }

        let hits = self.simulation_hits()?;
        let scores = ComponentScores {
            structure: self.structure(),
            research: self.research(profile),
            avatar: self.avatar(),
            insights: self.insights(profile)?,
            simulation: simulation_score(hits, profile.simulation_tolerance),
        }
        .clamped();

        debug!(
            "{} components: structure={:.1}, research={:.1}, avatar={:.1}, insights={:.1}, simulation={:.1} ({} phrase hits)",
            profile.name(),
            scores.structure,
            scores.research,
            scores.avatar,
            scores.insights,
            scores.simulation,
            hits
        );

        Ok(scores)
    }

    /// Half the points for the essential sections, half spread over the optional ones
    pub fn structure(&self) -> f64 {
        let keys = &self.config.sections;
        let mut score = 0.0;

        if !keys.essential.is_empty() {
            let per_section = ESSENTIAL_POINTS / keys.essential.len() as f64;
            for section in &keys.essential {
                if has_section(self.analysis, section) {
                    score += per_section;
                }
            }
        }

        if !keys.optional.is_empty() {
            let per_section = OPTIONAL_POINTS / keys.optional.len() as f64;
            for section in &keys.optional {
                if has_section(self.analysis, section) {
                    score += per_section;
                }
            }
        }

        score.min(100.0)
    }

    /// Research volume, breadth and quality relative to the profile
    pub fn research(&self, profile: &ThresholdProfile) -> f64 {
        let keys = &self.config.sections;
        let Some(research) = self.analysis.get(&keys.research).filter(|v| is_present(v)) else {
            return 0.0;
        };

        let mut score = RESEARCH_BASE;

        let Some(stats) = research
            .as_object()
            .and_then(|r| r.get(&keys.research_stats))
            .and_then(Value::as_object)
        else {
            return score;
        };

        let content = number(stats.get(&keys.content_length_field));
        let sources = number(stats.get(&keys.unique_sources_field));
        let quality = number(stats.get(&keys.average_quality_field)).clamp(0.0, 100.0);

        score += share(content, profile.min_content_length as f64, RESEARCH_CONTENT_POINTS);
        score += share(sources, profile.min_sources as f64, RESEARCH_SOURCE_POINTS);
        score += quality / 100.0 * RESEARCH_QUALITY_POINTS;

        score.min(100.0)
    }

    /// Avatar completeness: base for existing, plus a share per filled subsection
    pub fn avatar(&self) -> f64 {
        let keys = &self.config.sections;
        let Some(avatar) = self.analysis.get(&keys.avatar).filter(|v| is_present(v)) else {
            return 0.0;
        };

        let mut score = AVATAR_BASE;

        let (Some(avatar), false) = (avatar.as_object(), keys.avatar_subsections.is_empty())
        else {
            return score;
        };

        let per_section = AVATAR_SUBSECTION_POINTS / keys.avatar_subsections.len() as f64;
        for section in &keys.avatar_subsections {
            if avatar
                .get(section)
                .is_some_and(|v| is_substantial(v, AVATAR_MIN_TEXT_CHARS))
            {
                score += per_section;
            }
        }

        score.min(100.0)
    }

    /// Insight count relative to the profile, plus the share of substantial insights
    pub fn insights(&self, profile: &ThresholdProfile) -> Result<f64, ScoringError> {
        let items = match self.analysis.get(&self.config.sections.insights) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Ok(INSIGHTS_BASE),
        };

        let mut score = INSIGHTS_BASE;
        score += share(
            items.len() as f64,
            profile.min_insights as f64,
            INSIGHTS_COUNT_POINTS,
        );

        let mut substantial = 0usize;
        for (index, item) in items.iter().enumerate() {
            let len = measure(item).ok_or(ScoringError::UnmeasurableInsight {
                index,
                kind: kind_name(item),
            })?;
            if len > SUBSTANTIAL_INSIGHT_CHARS {
                substantial += 1;
            }
        }
        score += substantial as f64 / items.len() as f64 * INSIGHTS_DEPTH_POINTS;

        Ok(score.min(100.0))
    }

    /// Occurrences of the configured genericness phrases in the serialized analysis
    pub fn simulation_hits(&self) -> Result<usize, ScoringError> {
        let text = serde_json::to_string(self.analysis)?.to_lowercase();
        Ok(self
            .config
            .simulation
            .phrases
            .iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .map(|p| text.matches(p.as_str()).count())
            .sum())
    }
}

/// Simulation score for a phrase count under a tolerance
///
/// `hits <= tol` -> 100, `<= 2×tol` -> 70, `<= 3×tol` -> 40, else 10.
pub fn simulation_score(hits: usize, tolerance: u64) -> f64 {
    let hits = hits as u64;
    if hits <= tolerance {
        100.0
    } else if hits <= tolerance.saturating_mul(2) {
        70.0
    } else if hits <= tolerance.saturating_mul(3) {
        40.0
    } else {
        10.0
    }
}

/// Linear share of `points`: full when `actual` meets `required`
fn share(actual: f64, required: f64, points: f64) -> f64 {
    if actual >= required {
        points
    } else if actual > 0.0 {
        actual / required * points
    } else {
        0.0
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
