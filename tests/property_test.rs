//! Property tests for the validator invariants

use analysis_gate::config::ValidatorConfig;
use analysis_gate::validation::{clean_analysis, simulation_score, Validator, PROFILES};
use analysis_gate::Analysis;
use proptest::prelude::*;
use serde_json::Value;

/// Arbitrary JSON, biased towards the section keys and failure markers
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..100_000).prop_map(Value::from),
        (0.0f64..1000.0).prop_map(Value::from),
        "[a-zA-Z_/ ]{0,60}".prop_map(Value::String),
        Just(Value::String("ERRO_timeout".into())),
        Just(Value::String("n/a".into())),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("avatar_ultra_detalhado".to_string()),
        Just("insights_exclusivos".to_string()),
        Just("pesquisa_web_massiva".to_string()),
        Just("estatisticas".to_string()),
        Just("drivers_mentais_customizados".to_string()),
        Just("FALHA_step".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn analysis() -> impl Strategy<Value = Analysis> {
    prop::collection::btree_map(key(), json_value(), 0..8).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn verdict_is_always_valid_and_bounded(doc in analysis()) {
        let verdict = Validator::default().validate(&doc, None);
        prop_assert!(verdict.valid);
        prop_assert!(verdict.can_continue);
        prop_assert!((0.0..=100.0).contains(&verdict.quality_score));
        for (_, score) in verdict.component_scores.entries() {
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn quality_is_mean_of_components(doc in analysis()) {
        let verdict = Validator::default().validate(&doc, None);
        let mean = verdict.component_scores.mean();
        prop_assert!((verdict.quality_score - mean).abs() < 1e-9);
    }

    #[test]
    fn attempts_follow_profile_order(doc in analysis()) {
        let verdict = Validator::default().validate(&doc, None);
        for (attempt, profile) in verdict.attempts.iter().zip(PROFILES.iter()) {
            prop_assert_eq!(attempt.level, profile.level);
        }
        // Only the last attempt can be the accepted one
        let accepted = verdict.attempts.iter().filter(|a| a.accepted).count();
        prop_assert!(accepted <= 1);
        if accepted == 1 {
            prop_assert!(verdict.attempts.last().is_some_and(|a| a.accepted));
        }
    }

    #[test]
    fn simulation_monotonic(hits in 0usize..200, extra in 0usize..50, tol in 0u64..40, more_tol in 0u64..40) {
        prop_assert!(simulation_score(hits + extra, tol) <= simulation_score(hits, tol));
        prop_assert!(simulation_score(hits, tol + more_tol) >= simulation_score(hits, tol));
    }

    #[test]
    fn cleaning_is_idempotent(doc in analysis()) {
        let markers = ValidatorConfig::default().cleaning.invalid_markers;
        let once = clean_analysis(&doc, &markers);
        let twice = clean_analysis(&once, &markers);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cleaning_leaves_no_marked_keys(doc in analysis()) {
        let markers = ValidatorConfig::default().cleaning.invalid_markers;
        let cleaned = clean_analysis(&doc, &markers);
        let text = serde_json::to_string(&cleaned).unwrap().to_uppercase();
        for marker in &markers {
            prop_assert!(!text.contains(marker.as_str()));
        }
    }

    #[test]
    fn pdf_requires_avatar(doc in analysis()) {
        let mut doc = doc;
        doc.remove("avatar_ultra_detalhado");
        prop_assert!(!Validator::default().should_generate_pdf(&doc).eligible);
    }
}
