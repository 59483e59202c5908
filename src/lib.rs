//! analysis-gate - progressive-tolerance validation of orchestrator output
//!
//! An external orchestrator produces a loosely-shaped analysis document
//! (nested JSON). This crate scores it on five heuristic dimensions and
//! accepts it at the strictest of four threshold profiles it clears:
//!
//! ```text
//! STRICT -> MODERATE -> FLEXIBLE -> EMERGENCY -> EMERGENCY_OVERRIDE
//! ```
//!
//! The override always passes, so callers can always proceed; the verdict
//! only signals the quality tier.
//!
//! # Example
//!
//! ```rust
//! use analysis_gate::config::ValidatorConfig;
//! use analysis_gate::validation::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::new(ValidatorConfig::default());
//! let analysis = json!({ "avatar_ultra_detalhado": { "perfil_demografico": "Founders aged 30-45" } });
//! let verdict = validator.validate(analysis.as_object().unwrap(), Some("session-1"));
//! assert!(verdict.valid);
//! ```

pub mod config;
pub mod models;
pub mod observer;
pub mod reporters;
pub mod validation;

/// The analysis document handed over by the orchestrator.
pub type Analysis = serde_json::Map<String, serde_json::Value>;
