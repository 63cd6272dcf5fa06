//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kinconnect(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kinconnect").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("KINCONNECT_CONFIG", config_dir.path().join("config.toml"));
    cmd
}

// === Options Command Tests ===

#[test]
fn test_options_filter_matches_dropdown_rule() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["options", "conditions", "--filter", "DIA"])
        .assert()
        .success()
        .stdout(predicate::eq("Diabetes Type 1\nDiabetes Type 2\n"));
}

#[test]
fn test_options_allergies_json() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["options", "allergies", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Peanuts\""))
        .stdout(predicate::str::contains("\"Pollen\""));
}

#[test]
fn test_options_no_match_prints_nothing() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["options", "allergies", "-f", "Peanut Allergy"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_options_use_config_overrides() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[options]\nallergies = [\"Cats\", \"Dogs\"]\n",
    )
    .unwrap();

    kinconnect(&dir)
        .args(["options", "allergies"])
        .assert()
        .success()
        .stdout(predicate::eq("Cats\nDogs\n"));
}

// === Config Command Tests ===

#[test]
fn test_config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("elsewhere.toml");
    kinconnect(&dir)
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere.toml"));
}

#[test]
fn test_config_validate_without_file() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults apply"))
        .stdout(predicate::str::contains("Configuration valid"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    kinconnect(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    kinconnect(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_dropdown_rows"));
}

#[test]
fn test_config_validate_rejects_bad_toml() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[ui\ntick_rate_ms = ").unwrap();

    kinconnect(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// === TUI Command Tests ===

#[test]
fn test_tui_help_lists_pages() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["tui", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/test-dropdowns"));
}

#[test]
fn test_tui_rejects_unknown_page() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["tui", "--page", "/bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown page"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    kinconnect(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kinconnect"));
}
