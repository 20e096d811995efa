use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use predicates::prelude::predicate;

fn asset(name: &str) -> PathBuf {
    let mut path = project_root::get_project_root().unwrap();
    path.push(Path::new("pacejka-cli/tests/assets"));
    path.push(name);
    let path = path.canonicalize().unwrap();
    assert!(path.exists());
    path
}

#[test]
fn test_that_cli_app_produces_result() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let out_dir = tmp.path().join("outputs");
    let mut cmd = Command::cargo_bin("pacejka-cli")?;
    cmd.args([
        "--alpha",
        "2,5,8",
        "--weight",
        "1500",
        "--points",
        "50",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("coefficients: simple"))
        .stdout(predicate::str::contains("wheel load: 3678.75 N"));

    assert!(out_dir.join("longitudinal_force.png").is_file());
    assert!(out_dir.join("lateral_force.png").is_file());
    Ok(())
}

#[test]
fn test_that_cli_app_reports_json_for_bakker_coefficients() -> Result<(), Box<dyn std::error::Error>>
{
    let tmp = tempfile::tempdir()?;
    let coeffs_file = asset("bakker.json");
    let output = Command::cargo_bin("pacejka-cli")?
        .args([
            "--alpha",
            "8,-2",
            "--weight",
            "1500",
            "--gamma",
            "1.5",
            "--points",
            "40",
            "--coeffs-file",
            coeffs_file.to_str().unwrap(),
            "--output-dir",
            tmp.path().to_str().unwrap(),
            "--res-fmt",
            "json",
        ])
        .output()?;
    assert!(output.status.success());

    let res: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(res["coefficients"], "bakker");
    let conditions = res["conditions"].as_array().unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0]["slip_angle_deg"], 8.0);
    assert_eq!(conditions[1]["slip_angle_deg"], -2.0);
    assert!(conditions[0]["peak_fy_n"].as_f64().unwrap() > 0.0);
    assert_eq!(res["outputs"].as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn test_that_non_positive_weight_fails() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    for weight in ["0", "-5"] {
        Command::cargo_bin("pacejka-cli")?
            .args(["--alpha", "2", "--weight", weight])
            .args(["--output-dir", tmp.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid input"));
    }
    Ok(())
}

#[test]
fn test_that_bad_slip_angles_fail() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    for alpha in ["", "2,abc"] {
        Command::cargo_bin("pacejka-cli")?
            .args(["--alpha", alpha, "--weight", "1500"])
            .args(["--output-dir", tmp.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid input"));
    }
    Ok(())
}

#[test]
fn test_that_incomplete_coefficients_fail() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let coeffs_file = asset("missing_key.yaml");
    Command::cargo_bin("pacejka-cli")?
        .args(["--alpha", "2", "--weight", "1500"])
        .args(["--coeffs-file", coeffs_file.to_str().unwrap()])
        .args(["--output-dir", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
    assert!(!tmp.path().join("longitudinal_force.png").exists());
    Ok(())
}

#[test]
fn test_that_strict_mode_rejects_non_finite_forces() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let coeffs_file = asset("degenerate.yaml");
    let args = [
        "--alpha",
        "3",
        "--weight",
        "1500",
        "--points",
        "10",
        "--coeffs-file",
        coeffs_file.to_str().unwrap(),
        "--output-dir",
        tmp.path().to_str().unwrap(),
    ];

    // without --strict the NaN samples are left out of the chart
    Command::cargo_bin("pacejka-cli")?
        .args(args)
        .assert()
        .success();
    Command::cargo_bin("pacejka-cli")?
        .args(args)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("domain error"));
    Ok(())
}

#[test]
fn test_that_bundled_coefficients_load_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    Command::cargo_bin("pacejka-cli")?
        .args(["--alpha", "2,2,5", "--weight", "1500", "--points", "20"])
        .args(["--coeffs-file", "bakker.yaml"])
        .args(["--output-dir", tmp.path().to_str().unwrap()])
        .args(["--res-fmt", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""coefficients":"bakker""#));

    Command::cargo_bin("pacejka-cli")?
        .args(["--alpha", "2", "--weight", "1500"])
        .args(["--coeffs-file", "no_such_tyre.yaml"])
        .args(["--output-dir", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"))
        .stderr(predicate::str::contains("bakker.yaml, simple.yaml"));
    Ok(())
}

#[test]
fn test_that_repeated_slip_angles_are_reported_once() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let output = Command::cargo_bin("pacejka-cli")?
        .args(["--alpha", "5,2,5,2", "--weight", "1500", "--points", "20"])
        .args(["--output-dir", tmp.path().to_str().unwrap()])
        .args(["--res-fmt", "json"])
        .output()?;
    assert!(output.status.success());
    let res: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let angles: Vec<f64> = res["conditions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slip_angle_deg"].as_f64().unwrap())
        .collect();
    assert_eq!(angles, vec![5.0, 2.0]);
    Ok(())
}
