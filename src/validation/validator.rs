//! Progressive validator
//!
//! Tries the threshold profiles strictest first and returns at the first
//! one the analysis clears. Never fails: an analysis that clears nothing
//! gets the emergency override verdict.

use super::cleaning::clean_analysis;
use super::component::check_component;
use super::gates::pdf_eligibility;
use super::profile::{ThresholdProfile, PROFILES};
use super::scorer::ComponentScorer;
use crate::config::ValidatorConfig;
use crate::models::{
    CleanedAnalysis, CleaningMetadata, ComponentCheck, ComponentScores, LevelAttempt,
    PdfEligibility, ValidationLevel, ValidationStats, Verdict,
};
use crate::observer::{ValidationEvent, ValidationObserver};
use crate::Analysis;
use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};

/// Score reported by the emergency override
const EMERGENCY_OVERRIDE_SCORE: f64 = 25.0;
/// Score reported by a forced pass
const FORCED_PASS_SCORE: f64 = 50.0;

/// Result of trying one profile
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    /// The quality score met the profile's threshold
    Accepted {
        scores: ComponentScores,
        quality_score: f64,
    },
    /// Below threshold, or scoring could not complete
    Rejected {
        scores: Option<ComponentScores>,
        quality_score: f64,
        reason: String,
        errors: Vec<String>,
    },
}

impl ProfileOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProfileOutcome::Accepted { .. })
    }

    fn to_attempt(&self, profile: &ThresholdProfile) -> LevelAttempt {
        match self {
            ProfileOutcome::Accepted { quality_score, .. } => LevelAttempt {
                level: profile.level,
                accepted: true,
                quality_score: *quality_score,
                min_quality_score: profile.min_quality_score,
                reason: String::new(),
                errors: Vec::new(),
            },
            ProfileOutcome::Rejected {
                quality_score,
                reason,
                errors,
                ..
            } => LevelAttempt {
                level: profile.level,
                accepted: false,
                quality_score: *quality_score,
                min_quality_score: profile.min_quality_score,
                reason: reason.clone(),
                errors: errors.clone(),
            },
        }
    }
}

/// Progressive-tolerance validator
///
/// Holds only immutable configuration and its observers, so one instance
/// can serve concurrent callers.
pub struct Validator {
    config: ValidatorConfig,
    observers: Vec<Box<dyn ValidationObserver>>,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Attach an observer notified after every attempt and terminal outcome
    pub fn register(&mut self, observer: Box<dyn ValidationObserver>) {
        tracing::debug!("Registered validation observer: {}", observer.name());
        self.observers.push(observer);
    }

    /// Builder form of [`Validator::register`]
    pub fn with_observer(mut self, observer: impl ValidationObserver + 'static) -> Self {
        self.register(Box::new(observer));
        self
    }

    /// Validate with progressive tolerance
    ///
    /// Returns at the strictest profile cleared, or the emergency override.
    /// `session_id` only correlates logs and observer events.
    pub fn validate(&self, analysis: &Analysis, session_id: Option<&str>) -> Verdict {
        let mut attempts = Vec::with_capacity(PROFILES.len());

        for profile in &PROFILES {
            info!("Trying validation level {}", profile.name());

            let outcome = self.attempt(analysis, profile);
            let attempt = outcome.to_attempt(profile);
            self.notify(&ValidationEvent::Attempt(&attempt), session_id);
            attempts.push(attempt);

            match outcome {
                ProfileOutcome::Accepted {
                    scores,
                    quality_score,
                } => {
                    info!(
                        "Analysis accepted at level {} ({:.1}%)",
                        profile.name(),
                        quality_score
                    );
                    return Verdict {
                        valid: true,
                        level: profile.level,
                        quality_score,
                        component_scores: scores,
                        errors: Vec::new(),
                        warnings: Vec::new(),
                        primary_reason: format!(
                            "Score {:.1}% >= {:.1}%",
                            quality_score, profile.min_quality_score
                        ),
                        recommendation: profile.recommendation().to_string(),
                        emergency_mode: false,
                        forced: false,
                        can_continue: true,
                        data_preserved: true,
                        session_id: session_id.map(str::to_string),
                        attempts,
                        timestamp: Utc::now(),
                    };
                }
                ProfileOutcome::Rejected { reason, .. } => {
                    warn!("Analysis rejected at level {}: {}", profile.name(), reason);
                }
            }
        }

        error!("Analysis rejected at every validation level");
        self.emergency_override(attempts, session_id)
    }

    /// Score the analysis under a single profile
    pub fn attempt(&self, analysis: &Analysis, profile: &ThresholdProfile) -> ProfileOutcome {
        match ComponentScorer::new(analysis, &self.config).score(profile) {
            Ok(scores) => {
                let quality_score = scores.mean();
                if quality_score >= profile.min_quality_score {
                    ProfileOutcome::Accepted {
                        scores,
                        quality_score,
                    }
                } else {
                    ProfileOutcome::Rejected {
                        scores: Some(scores),
                        quality_score,
                        reason: format!(
                            "Score {:.1}% < {:.1}%",
                            quality_score, profile.min_quality_score
                        ),
                        errors: Vec::new(),
                    }
                }
            }
            Err(e) => ProfileOutcome::Rejected {
                scores: None,
                quality_score: 0.0,
                reason: format!("Technical error: {}", e),
                errors: vec![format!("Validation error: {}", e)],
            },
        }
    }

    /// Always-passing verdict issued once every profile has rejected
    fn emergency_override(&self, attempts: Vec<LevelAttempt>, session_id: Option<&str>) -> Verdict {
        warn!("Issuing emergency validation - analysis will continue");

        let verdict = Verdict {
            valid: true,
            level: ValidationLevel::EmergencyOverride,
            quality_score: EMERGENCY_OVERRIDE_SCORE,
            component_scores: ComponentScores::uniform(EMERGENCY_OVERRIDE_SCORE),
            errors: Vec::new(),
            warnings: vec![
                "Validation running in emergency mode".to_string(),
                "Quality may be compromised".to_string(),
                "Intermediate data preserved".to_string(),
            ],
            primary_reason: "Emergency mode activated - analysis proceeds with available data"
                .to_string(),
            recommendation: "EMERGENCY: configure the data sources and re-run for full quality"
                .to_string(),
            emergency_mode: true,
            forced: false,
            can_continue: true,
            data_preserved: true,
            session_id: session_id.map(str::to_string),
            attempts,
            timestamp: Utc::now(),
        };

        self.notify(&ValidationEvent::EmergencyOverride(&verdict), session_id);
        verdict
    }

    /// Operator override: pass without scoring
    pub fn force_pass(&self, _analysis: &Analysis, reason: &str, session_id: Option<&str>) -> Verdict {
        warn!("Forcing validation pass: {}", reason);

        let verdict = Verdict {
            valid: true,
            level: ValidationLevel::ForcedPass,
            quality_score: FORCED_PASS_SCORE,
            component_scores: ComponentScores::uniform(FORCED_PASS_SCORE),
            errors: Vec::new(),
            warnings: vec![format!("Forced validation: {}", reason)],
            primary_reason: reason.to_string(),
            recommendation: "Forced validation - proceed with caution".to_string(),
            emergency_mode: false,
            forced: true,
            can_continue: true,
            data_preserved: true,
            session_id: session_id.map(str::to_string),
            attempts: Vec::new(),
            timestamp: Utc::now(),
        };

        self.notify(&ValidationEvent::ForcedPass(&verdict), session_id);
        verdict
    }

    /// Whether the analysis has the minimum content for a PDF report
    pub fn should_generate_pdf(&self, analysis: &Analysis) -> PdfEligibility {
        pdf_eligibility(analysis, &self.config.sections)
    }

    /// Strip marker-bearing fields and attach cleaning metadata
    pub fn clean_for_output(&self, analysis: &Analysis) -> CleanedAnalysis {
        let cleaned = clean_analysis(analysis, &self.config.cleaning.invalid_markers);
        let validation_metadata = CleaningMetadata {
            cleaned_at: Utc::now(),
            cleaning_level: "flexible".to_string(),
            original_size: serialized_size(analysis),
            cleaned_size: serialized_size(&cleaned),
            data_preserved: true,
            simulation_tolerance: "high".to_string(),
        };
        CleanedAnalysis {
            analysis: cleaned,
            validation_metadata,
        }
    }

    /// Score one component on its own; never blocks the analysis
    pub fn check_component(&self, name: &str, data: Option<&Value>) -> ComponentCheck {
        check_component(name, data, &self.config.sections)
    }

    /// Available levels and their thresholds
    pub fn stats(&self) -> ValidationStats {
        ValidationStats {
            available_levels: PROFILES.iter().map(|p| p.level).collect(),
            level_thresholds: PROFILES.iter().map(ThresholdProfile::thresholds).collect(),
            emergency_mode_available: true,
            forced_pass_available: true,
        }
    }

    fn notify(&self, event: &ValidationEvent<'_>, session_id: Option<&str>) {
        for observer in &self.observers {
            if let Err(e) = observer.record(event, session_id) {
                warn!(
                    "Observer {} failed to record {}: {}",
                    observer.name(),
                    event.step_name(),
                    e
                );
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

fn serialized_size(analysis: &Analysis) -> usize {
    serde_json::to_string(analysis).map(|s| s.len()).unwrap_or(0)
}
