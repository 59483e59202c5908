//! Progressive-tolerance validation
//!
//! Scores an analysis document on five dimensions and accepts it at the
//! strictest threshold profile it clears.
//!
//! # Scoring Formula
//!
//! ```text
//! Quality = (Structure + Research + Avatar + Insights + Simulation) / 5
//!
//! Structure  = 50 (essential section) + 50 / n per optional section
//! Research   = 20 base + 30 × content ratio + 30 × source ratio + 20 × avg quality
//! Avatar     = 20 base + 80 / n per substantial subsection
//! Insights   = 10 base + 50 × count ratio + 40 × share of insights > 50 chars
//! Simulation = 100 / 70 / 40 / 10 by phrase hits vs tolerance (1×, 2×, 3×)
//! ```
//!
//! Ratios are capped at 1.0 against the profile's requirements, so the
//! same document scores higher under looser profiles.
//!
//! # Profiles
//!
//! | Level     | Content | Sources | Insights | Min score | Tolerance |
//! |-----------|---------|---------|----------|-----------|-----------|
//! | STRICT    | 5000    | 5       | 10       | 80        | 0         |
//! | MODERATE  | 2000    | 3       | 5        | 60        | 5         |
//! | FLEXIBLE  | 500     | 1       | 3        | 40        | 10        |
//! | EMERGENCY | 100     | 0       | 1        | 20        | 20        |
//!
//! When no profile is cleared the validator issues an `EMERGENCY_OVERRIDE`
//! verdict (valid, score 25) so the caller can always proceed.

mod cleaning;
mod component;
mod gates;
mod profile;
pub mod sections;
mod scorer;
mod validator;

pub use cleaning::clean_analysis;
pub use profile::{profile_for, ThresholdProfile, PROFILES};
pub use scorer::{simulation_score, ComponentScorer, ScoringError};
pub use validator::{ProfileOutcome, Validator};
