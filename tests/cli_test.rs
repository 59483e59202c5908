//! CLI contract tests
//!
//! Runs the built binary against the fixtures: output formats, exit codes,
//! stdin input, config files and the journal.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_analysis-gate")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run in `dir` and return (exit code, stdout, stderr)
fn run(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("ANALYSIS_GATE_JOURNAL_DIR")
        .output()
        .expect("run analysis-gate");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn run_json(dir: &Path, args: &[&str]) -> (i32, serde_json::Value) {
    let (code, stdout, stderr) = run(dir, args);
    let json = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout}\nstderr: {stderr}"));
    (code, json)
}

#[test]
fn test_validate_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("strict.json");
    let (code, json) = run_json(
        dir.path(),
        &["validate", input.to_str().unwrap(), "--format", "json", "--session-id", "cli-1"],
    );

    assert_eq!(code, 0);
    assert_eq!(json["valid"], true);
    assert_eq!(json["level"], "STRICT");
    assert_eq!(json["session_id"], "cli-1");
}

#[test]
fn test_validate_generates_session_id() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("moderate.json");
    let (_, json) = run_json(dir.path(), &["validate", input.to_str().unwrap(), "-f", "json"]);

    let session = json["session_id"].as_str().unwrap();
    assert!(session.starts_with("session_"));
}

#[test]
fn test_validate_text_explain() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("moderate.json");
    let (code, stdout, _) = run(
        dir.path(),
        &["validate", input.to_str().unwrap(), "--explain", "--no-emoji"],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains("Level: MODERATE"));
    assert!(stdout.contains("ATTEMPTS"));
    assert!(stdout.contains("Score 75.0% < 80.0%"));
    assert!(!stdout.contains("🟡"));
}

#[test]
fn test_fail_below_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("moderate.json");
    let input = input.to_str().unwrap();

    let (code, _, _) = run(dir.path(), &["validate", input, "--fail-below", "moderate"]);
    assert_eq!(code, 0);

    let (code, _, _) = run(dir.path(), &["validate", input, "--fail-below", "strict"]);
    assert_eq!(code, 1);
}

#[test]
fn test_empty_object_from_stdin_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(bin())
        .args(["validate", "-", "--format", "json", "--fail-below", "emergency"])
        .current_dir(dir.path())
        .env_remove("ANALYSIS_GATE_JOURNAL_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"{}").unwrap();
    let output = child.wait_with_output().unwrap();

    // Valid, but below EMERGENCY
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["level"], "EMERGENCY_OVERRIDE");
    assert_eq!(json["quality_score"], 25.0);
}

#[test]
fn test_non_object_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("list.json");
    std::fs::write(&input, "[1, 2, 3]").unwrap();

    let (code, _, stderr) = run(dir.path(), &["validate", input.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("expected a JSON object"));
}

#[test]
fn test_clean_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("marked.json");
    let out = dir.path().join("clean.json");

    let (code, _, _) = run(
        dir.path(),
        &["clean", input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert_eq!(code, 0);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json.get("FALHA_pesquisa").is_none());
    assert!(json.get("status").is_none());
    assert_eq!(json["validation_metadata"]["cleaning_level"], "flexible");

    let (_, json) = run_json(dir.path(), &["clean", input.to_str().unwrap(), "--no-metadata"]);
    assert!(json.get("validation_metadata").is_none());
}

#[test]
fn test_pdf_check_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let good = fixture("strict.json");
    let (code, stdout, _) = run(dir.path(), &["pdf-check", good.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("PDF eligible"));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"insights_exclusivos": ["one"]}"#).unwrap();
    let (code, json) = run_json(dir.path(), &["pdf-check", bad.to_str().unwrap(), "-f", "json"]);
    assert_eq!(code, 1);
    assert_eq!(json["eligible"], false);
}

#[test]
fn test_force_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("marked.json");
    let (code, json) = run_json(
        dir.path(),
        &["force", input.to_str().unwrap(), "--reason", "reviewed by hand", "-f", "json"],
    );

    assert_eq!(code, 0);
    assert_eq!(json["level"], "FORCED_PASS");
    assert_eq!(json["quality_score"], 50.0);
    assert_eq!(json["primary_reason"], "reviewed by hand");
}

#[test]
fn test_component_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixture("strict.json");
    let (code, json) = run_json(
        dir.path(),
        &["component", input.to_str().unwrap(), "insights_exclusivos", "-f", "json"],
    );

    assert_eq!(code, 0);
    assert_eq!(json["component"], "insights_exclusivos");
    assert_eq!(json["score"], 90.0);
    assert_eq!(json["valid"], true);
}

#[test]
fn test_levels_command() {
    let dir = tempfile::tempdir().unwrap();
    let (code, json) = run_json(dir.path(), &["levels", "--format", "json"]);

    assert_eq!(code, 0);
    let levels: Vec<&str> = json["available_levels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(levels, ["STRICT", "MODERATE", "FLEXIBLE", "EMERGENCY"]);
}

#[test]
fn test_init_then_config_defaults_apply() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("analysis-gate.toml").exists());

    std::fs::write(
        dir.path().join("analysis-gate.toml"),
        "[defaults]\nformat = \"json\"\n",
    )
    .unwrap();
    let (_, json) = run_json(dir.path(), &["levels"]);
    assert!(json["level_thresholds"].is_array());
}

#[test]
fn test_bad_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "[simulation\nphrases = 3").unwrap();

    let (code, _, stderr) = run(dir.path(), &["levels", "--config", config.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid TOML config"));
}

#[test]
fn test_journal_dir_flag() {
    let dir = tempfile::tempdir().unwrap();
    let journal = dir.path().join("journal");
    let input = fixture("strict.json");

    let (code, _, _) = run(
        dir.path(),
        &[
            "validate",
            input.to_str().unwrap(),
            "--session-id",
            "j-1",
            "--journal-dir",
            journal.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0);

    let entries: Vec<_> = std::fs::read_dir(journal.join("j-1")).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
