//! CLI-level tests for the `kr` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kr() -> Command {
    Command::cargo_bin("kr").expect("binary builds")
}

#[test]
fn test_no_args_shows_usage() {
    kr().assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_command() {
    kr().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_path() {
    let temp = TempDir::new().unwrap();
    kr().args(["config", "--path", "--config-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}

#[test]
fn test_config_missing_file_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    kr().args(["config", "--config-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_migrate_stamps_config() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("keyremap");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("config.json"), "{\"version\": \"0.0.0\"}\n").unwrap();

    kr().args(["migrate", "--config-dir"])
        .arg(&root)
        .assert()
        .success();

    let config = fs::read_to_string(root.join("config.json")).unwrap();
    assert!(config.contains(&format!("\"version\": \"{}\"", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_migrate_full_legacy_tree() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("keyremap");
    fs::create_dir_all(root.join("Old Group")).unwrap();
    fs::write(root.join("config"), "{\"version\": \"0.0.0\"}\n").unwrap();
    fs::write(
        root.join("Old Group/p.json"),
        "{\"mapping\": {\"1,5\": \"a\"}}\n",
    )
    .unwrap();

    kr().args(["-v", "migrate", "--config-dir"])
        .arg(&root)
        .assert()
        .success();

    assert!(root.join("config.json").exists());
    let preset = fs::read_to_string(root.join("presets/Old Group/p.json")).unwrap();
    assert!(preset.contains("1,5,1"));
    assert!(preset.contains("keyboard"));
}

#[test]
fn test_migrate_is_idempotent_at_cli_level() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("keyremap");
    fs::create_dir_all(root.join("presets/Device")).unwrap();
    fs::write(root.join("config.json"), "{\"version\": \"0.0.0\"}\n").unwrap();
    fs::write(
        root.join("presets/Device/p.json"),
        "{\"mapping\": {\"1,5,1\": \"a\"}}\n",
    )
    .unwrap();

    kr().args(["migrate", "--config-dir"]).arg(&root).assert().success();
    let first = fs::read_to_string(root.join("presets/Device/p.json")).unwrap();
    kr().args(["migrate", "--config-dir"]).arg(&root).assert().success();
    let second = fs::read_to_string(root.join("presets/Device/p.json")).unwrap();

    assert_eq!(first, second);
}
