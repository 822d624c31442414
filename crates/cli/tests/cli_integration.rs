//! CLI integration tests for `dat2arff` and `arff-expr`.
//!
//! Uses `assert_cmd` to spawn the binaries and verify exit codes, stdout
//! content, stderr content and the files left behind.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CARS_CONF: &str = "cars\nspeed numeric\n+fast speed>100?yes:no\n";
const CARS_DAT: &str = "50\n150\n";
const CARS_ARFF: &str = "@relation cars\n\n\
                         @attribute speed numeric\n\
                         @attribute fast {yes,no}\n\n\
                         @data\n%\n% 2 instances\n%\n\
                         50, no\n\
                         150, yes\n";

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn dat2arff() -> Command {
    let mut cmd = cargo_bin_cmd!("dat2arff");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn arff_expr() -> Command {
    cargo_bin_cmd!("arff-expr")
}

/// Temp dir holding `cars.conf` and `cars.dat`.
fn cars_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cars.conf"), CARS_CONF).unwrap();
    fs::write(dir.path().join("cars.dat"), CARS_DAT).unwrap();
    dir
}

// ──────────────────────────────────────────────
// 1. Help and usage
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    dat2arff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert raw data files to ARFF"));
}

#[test]
fn missing_config_flag_is_usage_error() {
    dat2arff().arg("cars.dat").assert().code(2);
}

// ──────────────────────────────────────────────
// 2. Conversion
// ──────────────────────────────────────────────

#[test]
fn converts_to_default_output_path() {
    let dir = cars_dir();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ARFF file written to"));
    let written = fs::read_to_string(dir.path().join("cars.dat.arff")).unwrap();
    assert_eq!(written, CARS_ARFF);
}

#[test]
fn explicit_output_and_quiet() {
    let dir = cars_dir();
    let out = dir.path().join("out.arff");
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("--config")
        .arg(dir.path().join("cars.conf"))
        .arg("-o")
        .arg(&out)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(fs::read_to_string(out).unwrap(), CARS_ARFF);
}

#[test]
fn conformance_fixture_converts() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("weather.arff");
    dat2arff()
        .args([
            "conformance/positive/weather.dat",
            "-c",
            "conformance/positive/weather.conf",
        ])
        .arg("-o")
        .arg(&target)
        .assert()
        .success();
    let expected =
        fs::read_to_string(workspace_root().join("conformance/positive/weather.expected.arff"))
            .unwrap();
    assert_eq!(fs::read_to_string(target).unwrap(), expected);
}

// ──────────────────────────────────────────────
// 3. Pre-flight checks
// ──────────────────────────────────────────────

#[test]
fn missing_data_file_is_reported() {
    let dir = cars_dir();
    let missing = dir.path().join("nope.dat");
    dat2arff()
        .arg(&missing)
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "Error: The data file {} does not exist.",
            missing.display()
        )));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = cars_dir();
    let missing = dir.path().join("nope.conf");
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(format!(
            "Error: The config file {} does not exist.",
            missing.display()
        )));
    assert!(!dir.path().join("cars.dat.arff").exists());
}

// ──────────────────────────────────────────────
// 4. Overwrite confirmation
// ──────────────────────────────────────────────

fn existing_output() -> (TempDir, PathBuf) {
    let dir = cars_dir();
    let out = dir.path().join("cars.dat.arff");
    fs::write(&out, "old contents\n").unwrap();
    (dir, out)
}

#[test]
fn declining_overwrite_keeps_old_file() {
    let (dir, out) = existing_output();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Warning: The output file exists. Do you want to replace it? [y/n]",
        ))
        .stdout(predicate::str::contains(
            "ARFF file generation stopped. Provide a valid output file.",
        ));
    assert_eq!(fs::read_to_string(out).unwrap(), "old contents\n");
}

#[test]
fn accepting_overwrite_after_reprompt() {
    let (dir, out) = existing_output();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .write_stdin("sure\nY\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please, type 'y' or 'n':"));
    assert_eq!(fs::read_to_string(out).unwrap(), CARS_ARFF);
}

#[test]
fn end_of_input_declines_overwrite() {
    let (dir, out) = existing_output();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .write_stdin("")
        .assert()
        .code(1);
    assert_eq!(fs::read_to_string(out).unwrap(), "old contents\n");
}

#[test]
fn yes_flag_skips_prompt() {
    let (dir, out) = existing_output();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning").not());
    assert_eq!(fs::read_to_string(out).unwrap(), CARS_ARFF);
}

// ──────────────────────────────────────────────
// 5. Conversion errors
// ──────────────────────────────────────────────

#[test]
fn conversion_error_leaves_no_output_file() {
    let dir = cars_dir();
    fs::write(dir.path().join("cars.dat"), "50\nfast\n").unwrap();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: line 2, column 1: 'fast' is not a numeric value for attribute 'speed'",
        ));
    assert!(!dir.path().join("cars.dat.arff").exists());
}

#[test]
fn conversion_error_as_json() {
    let dir = cars_dir();
    fs::write(dir.path().join("cars.conf"), "cars\nspeed float\n").unwrap();
    let output = dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .args(["--error-format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["kind"], "UnknownAttributeTypeError");
    assert_eq!(err["pass"], 1);
    assert_eq!(err["line"], 2);
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let dir = cars_dir();
    dat2arff()
        .arg(dir.path().join("cars.dat"))
        .arg("-c")
        .arg(dir.path().join("cars.conf"))
        .args(["-vv", "--log-format", "compact"])
        .assert()
        .success()
        .stderr(predicate::str::contains("config parsed"))
        .stdout(predicate::str::contains("config parsed").not());
}

// ──────────────────────────────────────────────
// 6. arff-expr
// ──────────────────────────────────────────────

#[test]
fn expr_transformation_ok() {
    arff_expr()
        .args(["transformation", "age<=30?old:young"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transformation expression OK."))
        .stdout(predicate::str::contains("Attribute to compare: 'age'"))
        .stdout(predicate::str::contains("Comparison operator '<='"))
        .stdout(predicate::str::contains("Comparing to: '30'"))
        .stdout(predicate::str::contains("Result if true: 'old'"))
        .stdout(predicate::str::contains("Result if false: 'young'"));
}

#[test]
fn expr_transformation_prints_threshold_verbatim() {
    arff_expr()
        .args(["transformation", "speed>30.50?fast:slow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comparing to: '30.50'"));
}

#[test]
fn expr_transformation_invalid() {
    arff_expr()
        .args(["transformation", "age=<30?old:young"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: It is not a valid transformation expression.",
        ));
}

#[test]
fn expr_nominals_ok() {
    arff_expr()
        .args(["nominals", "{red,green,blue}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nominals expression OK."))
        .stdout(predicate::str::contains("Nominals: [red, green, blue]"));
}

#[test]
fn expr_nominals_invalid() {
    arff_expr()
        .args(["nominals", "{red,}"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: It is not a valid array of nominals.",
        ));
}

#[test]
fn expr_json_output() {
    let output = arff_expr()
        .args(["transformation", "speed>100?yes:no", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["transformation"]["op"], ">");
    assert_eq!(v["transformation"]["value"], 100);
}

#[test]
fn expr_unknown_kind_is_usage_error() {
    arff_expr().args(["regex", "a"]).assert().code(2);
}
