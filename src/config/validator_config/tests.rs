use super::*;

#[test]
fn test_default_config() {
    let config = ValidatorConfig::default();

    assert_eq!(config.sections.essential, vec!["avatar_ultra_detalhado"]);
    assert_eq!(config.sections.optional.len(), 5);
    assert_eq!(config.sections.avatar_subsections.len(), 4);
    assert_eq!(config.simulation.phrases.len(), 8);
    assert!(config.simulation.phrases.contains(&"placeholder".to_string()));
    assert_eq!(config.cleaning.invalid_markers, vec!["ERRO_", "FALHA_", "INVALID_"]);
    assert!(!config.journal.enabled);
}

#[test]
fn test_empty_toml_is_default() {
    let config: ValidatorConfig = toml::from_str("").unwrap();
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn test_template_parses_to_default() {
    let config: ValidatorConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let toml_str = r#"
[sections]
avatar = "persona"
insights = "takeaways"

[simulation]
phrases = ["lorem ipsum"]
"#;
    let config: ValidatorConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.sections.avatar, "persona");
    assert_eq!(config.sections.insights, "takeaways");
    assert_eq!(config.sections.research, "pesquisa_web_massiva");
    assert_eq!(config.simulation.phrases, vec!["lorem ipsum"]);
    assert_eq!(config.cleaning.invalid_markers.len(), 3);
}

#[test]
fn test_journal_and_defaults() {
    let toml_str = r#"
[journal]
enabled = true
dir = "/tmp/journal"

[defaults]
format = "json"
no_emoji = true
"#;
    let config: ValidatorConfig = toml::from_str(toml_str).unwrap();

    assert!(config.journal.enabled);
    assert_eq!(config.journal.effective_dir(), PathBuf::from("/tmp/journal"));
    assert_eq!(config.defaults.format.as_deref(), Some("json"));
    assert_eq!(config.defaults.no_emoji, Some(true));
}

#[test]
fn test_default_journal_dir_is_namespaced() {
    let dir = default_journal_dir();
    assert!(dir.ends_with("analysis-gate/journal"));
}

#[test]
fn test_load_config_prefers_toml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("analysis-gate.toml"),
        "[simulation]\nphrases = [\"from-toml\"]\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".analysis-gate.json"),
        r#"{"simulation": {"phrases": ["from-json"]}}"#,
    )
    .unwrap();

    let config = load_config(dir.path());
    assert_eq!(config.simulation.phrases, vec!["from-toml"]);
}

#[test]
fn test_load_config_json_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".analysis-gate.json"),
        r#"{"cleaning": {"invalid_markers": ["BROKEN_"]}}"#,
    )
    .unwrap();

    let config = load_config(dir.path());
    assert_eq!(config.cleaning.invalid_markers, vec!["BROKEN_"]);
}

#[test]
fn test_load_config_invalid_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("analysis-gate.toml"), "this is = = not toml").unwrap();

    let config = load_config(dir.path());
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn test_load_config_missing_dir_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("nope"));
    assert_eq!(config, ValidatorConfig::default());
}

#[test]
fn test_load_config_file_rejects_empty_phrase() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[simulation]\nphrases = [\"\"]\n").unwrap();

    let err = load_config_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("simulation phrases"));
}

#[test]
fn test_load_config_file_missing_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_file(&dir.path().join("absent.toml")).is_err());
}
