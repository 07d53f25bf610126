// The cargo_bin! macro requires build script setup that's overkill for simple tests.
// Suppress deprecation warning on the function until we need custom build-dir support.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const UNITS: &str = r#"
infantry_brigade = { domain = land practical = infantry_practical }
artillery_brigade = { domain = land practical = artillery_practical }
fighter = { domain = air practical = fighter_practical }
destroyer = { domain = navy practical = destroyer_practical }
"#;

const MAPPING: &str = r#"
default = {
    link = { vic = infantry hoi0 = infantry_brigade }
    link = { vic = artillery hoi1 = artillery_brigade }
    link = { vic = plane hoi3 = fighter }
    link = { vic = monitor hoi0 = destroyer }
}
"#;

const WORLD: &str = r#"{
    "provinces": {
        "1": { "owner": "ENG", "air_base": 1 },
        "2": { "owner": "ENG" }
    },
    "adjacency": { "1": [2], "2": [1] },
    "location_mapping": { "10": [1], "20": [2] },
    "countries": {
        "ENG": [
            {
                "name": "British Expeditionary Force",
                "location": 10,
                "regiments": [
                    { "name": "Grenadier Guards", "type": "infantry" },
                    { "name": "Royal Artillery", "type": "artillery" },
                    { "name": "RFC", "type": "plane" }
                ]
            },
            {
                "name": "Channel Fleet",
                "navy": true,
                "location": 20,
                "regiments": [ { "name": "HMS Monitor", "type": "monitor" } ]
            }
        ]
    }
}"#;

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("units.txt"), UNITS).unwrap();
    fs::write(dir.path().join("unit_mapping.txt"), MAPPING).unwrap();
    fs::write(dir.path().join("world.json"), WORLD).unwrap();
    dir
}

fn command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vic2hoi4").expect("binary");
    cmd.arg("--world")
        .arg(dir.join("world.json"))
        .arg("--units")
        .arg(dir.join("units.txt"))
        .arg("--mapping")
        .arg(dir.join("unit_mapping.txt"));
    cmd
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("vic2hoi4")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--mapping"))
        .stdout(predicate::str::contains("--basing"));
}

#[test]
fn test_converts_to_stdout() {
    let dir = fixture();
    let output = command(dir.path())
        .arg("--basing")
        .arg("first")
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let eng = &report["countries"][0];
    assert_eq!(eng["tag"], "ENG");
    assert_eq!(eng["armies"][0]["name"], "British Expeditionary Force");
    assert_eq!(eng["armies"][0]["basing"]["province"], 1);
    assert_eq!(eng["armies"][1]["force_type"], "navy");
    // Province 2 has no naval base and no sea neighbour.
    assert_eq!(eng["armies"][1]["basing"], "production_queue");
    assert_eq!(eng["practicals"]["infantry_practical"], 1.0);
    assert_eq!(report["air_bases"][0]["province"], 1);
    assert_eq!(report["air_bases"][0]["level"], 3);
}

#[test]
fn test_writes_output_file() {
    let dir = fixture();
    let out = dir.path().join("forces.json");
    command(dir.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"1st Air Force\""));
}

#[test]
fn test_config_file_is_read() {
    let dir = fixture();
    fs::write(dir.path().join("configuration.txt"), "practicals_scale = 0.5\n").unwrap();
    let output = command(dir.path())
        .arg("--config")
        .arg(dir.path().join("configuration.txt"))
        .output()
        .expect("run");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["countries"][0]["practicals"]["infantry_practical"], 0.5);
}

#[test]
fn test_missing_mapping_file_fails() {
    let dir = fixture();
    let mut cmd = Command::cargo_bin("vic2hoi4").unwrap();
    cmd.arg("--world")
        .arg(dir.path().join("world.json"))
        .arg("--units")
        .arg(dir.path().join("units.txt"))
        .arg("--mapping")
        .arg("/nonexistent/unit_mapping.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load unit mappings"));
}

#[test]
fn test_bad_basing_strategy_is_rejected() {
    let dir = fixture();
    command(dir.path())
        .arg("--basing")
        .arg("sometimes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown basing strategy"));
}
