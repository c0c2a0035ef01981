//! Runs the `cine-rig` binary against the sample descriptor.

use std::path::PathBuf;
use std::process::{Command, Output};

fn sample_descriptor() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/lenses/cooke_ana_i_s35_50mm.json")
}

fn command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cine-rig"));
    command
        .env_remove("CINERIG_LENS_PATH")
        .env_remove("CINERIG_DAMPING_BASE")
        .env_remove("CINERIG_BODY_WEIGHT_KG")
        .env_remove("CINERIG_CALIBRATION_PATH")
        .env_remove("CINERIG_BODY")
        .env("LOG_FORMAT", "json");
    command
}

fn cine_rig(args: &[&str]) -> Output {
    command().args(args).output().unwrap()
}

/// `cine-rig report --lens <sample> <args>`
fn report(args: &[&str]) -> Output {
    command()
        .arg("report")
        .arg("--lens")
        .arg(sample_descriptor())
        .args(args)
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_report() {
    let report = stdout_json(&report(&["2.8", "2.0"]));
    assert_eq!(report["lens_id"], "cooke_ana_i_s35_50mm");
    assert_eq!(report["camera"]["cinema:camera:model"], "ARRI ALEXA 35");
    assert_eq!(report["lens"]["cinema:lens:squeezeRatioNominal"], 2.0);
    assert!(report["optics"]["cinema:optics:hfovDeg"].as_f64().unwrap() > 0.0);
    assert!(report.get("sequence").is_none());
}

#[test]
fn test_descriptor_from_environment() {
    let output = command()
        .env("CINERIG_LENS_PATH", sample_descriptor())
        .args(["report", "2.8", "2.0"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["lens_id"], "cooke_ana_i_s35_50mm");
}

#[test]
fn test_report_with_focus_pull() {
    let report = stdout_json(&report(&["2.8", "10", "0.85", "24"]));
    let sequence = report["sequence"].as_array().unwrap();
    assert_eq!(sequence.len(), 24);
    assert_eq!(sequence[23]["effective_squeeze"], 1.85);
}

#[test]
fn test_far_limit_past_hyperfocal_is_null() {
    let report = stdout_json(&report(&["22", "infinity"]));
    assert!(report["optics"]["cinema:optics:dofFarM"].is_null());
}

#[test]
fn test_list_and_schema() {
    let listing = stdout_json(&cine_rig(&["list"]));
    assert_eq!(listing["bodies"][0], "arri_alexa_35");
    assert_eq!(listing["lenses"][0], "cooke_ana_i_s35");

    let schema = stdout_json(&cine_rig(&["schema"]));
    assert!(schema["properties"]["squeeze_breathing"].is_object());
}

#[test]
fn test_usage_errors_exit_with_two() {
    assert_eq!(cine_rig(&["report", "2.8", "2.0"]).status.code(), Some(2));
    assert_eq!(report(&["2.8"]).status.code(), Some(2));
    assert_eq!(report(&["fast", "2.0"]).status.code(), Some(2));
    assert_eq!(report(&["2.8", "3.0", "1.0", "0"]).status.code(), Some(2));
}

#[test]
fn test_invalid_state_exits_with_one() {
    let output = report(&["1.4", "2.0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_body_weight_falls_back_to_body_default() {
    let output = command()
        .env("CINERIG_BODY_WEIGHT_KG", "NaN")
        .arg("report")
        .arg("--lens")
        .arg(sample_descriptor())
        .args(["2.8", "2.0"])
        .output()
        .unwrap();
    let weight = stdout_json(&output)["biomechanics"]["cinema:biomech:combinedWeightKg"]
        .as_f64()
        .unwrap();
    assert!((weight - 7.5).abs() < 1e-12);
}
