//! Threshold profiles, strictest first

use crate::models::{LevelThresholds, ValidationLevel};

/// Thresholds governing one validation tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdProfile {
    pub level: ValidationLevel,
    /// Research content length that earns the full content share
    pub min_content_length: u64,
    /// Unique research sources that earn the full source share
    pub min_sources: u64,
    /// Insight count that earns the full count share
    pub min_insights: u64,
    /// Overall quality required to accept at this level
    pub min_quality_score: f64,
    /// Simulation phrase hits tolerated before the score drops
    pub simulation_tolerance: u64,
}

impl ThresholdProfile {
    pub fn name(&self) -> &'static str {
        self.level.as_str()
    }

    /// Fixed guidance attached to verdicts accepted at this level
    pub fn recommendation(&self) -> &'static str {
        match self.level {
            ValidationLevel::Strict => {
                "EXCELLENT: premium-quality analysis - proceed with full confidence"
            }
            ValidationLevel::Moderate => {
                "GOOD: adequate-quality analysis - proceed with implementation"
            }
            ValidationLevel::Flexible => {
                "ACCEPTABLE: analysis has limitations - consider configuring more data sources for higher quality"
            }
            _ => "EMERGENCY: minimal analysis - re-run with the complete configuration",
        }
    }

    pub fn thresholds(&self) -> LevelThresholds {
        LevelThresholds {
            level: self.level,
            min_content_length: self.min_content_length,
            min_sources: self.min_sources,
            min_insights: self.min_insights,
            min_quality_score: self.min_quality_score,
            simulation_tolerance: self.simulation_tolerance,
        }
    }
}

/// The four profiles, in the order they are tried
pub const PROFILES: [ThresholdProfile; 4] = [
    ThresholdProfile {
        level: ValidationLevel::Strict,
        min_content_length: 5000,
        min_sources: 5,
        min_insights: 10,
        min_quality_score: 80.0,
        simulation_tolerance: 0,
    },
    ThresholdProfile {
        level: ValidationLevel::Moderate,
        min_content_length: 2000,
        min_sources: 3,
        min_insights: 5,
        min_quality_score: 60.0,
        simulation_tolerance: 5,
    },
    ThresholdProfile {
        level: ValidationLevel::Flexible,
        min_content_length: 500,
        min_sources: 1,
        min_insights: 3,
        min_quality_score: 40.0,
        simulation_tolerance: 10,
    },
    ThresholdProfile {
        level: ValidationLevel::Emergency,
        min_content_length: 100,
        min_sources: 0,
        min_insights: 1,
        min_quality_score: 20.0,
        simulation_tolerance: 20,
    },
];

/// Profile for a level; `None` for the synthetic override/forced levels
pub fn profile_for(level: ValidationLevel) -> Option<&'static ThresholdProfile> {
    PROFILES.iter().find(|p| p.level == level)
}
