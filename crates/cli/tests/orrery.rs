use assert_cmd::Command;
use predicates::str::contains;
use std::path::PathBuf;
use tempfile::tempdir;

fn config_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

#[test]
fn compact_run_reports_engulfment_and_writes_artifacts() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("trace.csv");
    let snapshot = dir.path().join("out/snapshot.json");

    Command::cargo_bin("orrery")
        .unwrap()
        .args([
            "--config",
            config_path("compact.toml").to_str().unwrap(),
            "--seconds",
            "2",
            "--focus",
            "Cinder",
            "--trace",
            trace.to_str().unwrap(),
            "--snapshot",
            snapshot.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("=== Orrery Run ==="))
        .stdout(contains("Cinder engulfed"))
        .stdout(contains("selection cleared"))
        .stdout(contains("Supernova"));

    let csv = std::fs::read_to_string(&trace).unwrap();
    assert!(csv.starts_with("elapsed_s,age,stage"));
    assert!(csv.lines().count() > 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&snapshot).unwrap()).unwrap();
    assert!(json["seed"].is_u64());
    assert_eq!(json["initial_mass"], 12.0);
    assert_eq!(json["snapshot"]["bodies"].as_array().unwrap().len(), 2);
}

#[test]
fn body_directory_replaces_catalog() {
    Command::cargo_bin("orrery")
        .unwrap()
        .args([
            "--bodies",
            config_path("bodies").to_str().unwrap(),
            "--seconds",
            "0.5",
            "--seed",
            "3",
        ])
        .assert()
        .success()
        .stdout(contains("0 of 2 engulfed"));
}

#[test]
fn unknown_focus_body_fails() {
    Command::cargo_bin("orrery")
        .unwrap()
        .args(["--seconds", "0.1", "--focus", "Krypton"])
        .assert()
        .failure()
        .stderr(contains("Krypton"));
}

#[test]
fn rejects_non_positive_fps() {
    Command::cargo_bin("orrery")
        .unwrap()
        .args(["--fps", "0"])
        .assert()
        .failure()
        .stderr(contains("--fps"));
}

#[test]
fn rejects_overflowing_durations() {
    Command::cargo_bin("orrery")
        .unwrap()
        .args(["--seconds", "1e20"])
        .assert()
        .failure()
        .stderr(contains("--seconds"));

    Command::cargo_bin("orrery")
        .unwrap()
        .args(["--seconds", "0.1", "--explode-at", "-1"])
        .assert()
        .failure()
        .stderr(contains("--explode-at"));
}
