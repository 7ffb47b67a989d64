#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
//! End-to-end runs of the `orbis` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn orbis(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("orbis").expect("binary built");
    cmd.arg("--config-dir").arg(config_dir).arg("--log-level").arg("warn");
    cmd
}

#[test]
fn simulate_prints_summary_and_passes_checks() {
    let dir = tempfile::tempdir().expect("tempdir");
    orbis(dir.path())
        .args(["simulate", "--entities", "120", "--ticks", "10", "--seed", "7", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("close tests"))
        .stdout(predicate::str::contains("collisions"))
        .stdout(predicate::str::contains("diagnostics"));
}

#[test]
fn same_seed_gives_same_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let run = || {
        orbis(dir.path())
            .args(["simulate", "--entities", "80", "--ticks", "5", "--seed", "99"])
            .output()
            .expect("run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    orbis(dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_range2\""));
    assert!(dir.path().join("collision.json").is_file());
}

#[test]
fn stored_config_is_used() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("collision.json"), r#"{"max_entities": 10}"#).expect("write");
    orbis(dir.path())
        .args(["simulate", "--entities", "50", "--ticks", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("handle space exhausted"));
}
