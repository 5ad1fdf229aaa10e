use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Calculator schema with a sum option and a verbosity switch.
fn write_calc_schema(dir: &Path) -> PathBuf {
    let yaml = r#"description: Calculate the sum of two integers
options:
  - flags: [s, sum]
    description: Returns the sum of x and y
    required: true
    parameter:
      kind: integer
      count: 2
      required: true
      placeholder: [x, y]
  - flags: [q, quiet]
    description: Print less
"#;
    let path = dir.join("calc.yaml");
    fs::write(&path, yaml).expect("failed to write schema");
    path
}

fn optparse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optparse"))
        .args(args)
        .output()
        .expect("failed to run optparse")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_result() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "-q",
        "-s",
        "2",
        "4",
        "notes.txt",
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["options"]["-s"], serde_json::json!([2, 4]));
    assert_eq!(report["options"]["-q"], serde_json::Value::Null);
    assert_eq!(report["positional"], serde_json::json!(["notes.txt"]));
}

#[test]
fn parse_prints_yaml_result() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "--sum=1,2",
    ]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let report: serde_yaml::Value = serde_yaml::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["options"]["-s"][1].as_i64(), Some(2));
}

#[test]
fn parse_error_exits_with_status_one() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&["parse", "--schema", schema.to_str().unwrap(), "--", "-q"]);

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out).trim(), "error: mandatory option -s not supplied");
    assert!(stdout(&out).is_empty());
}

#[test]
fn parse_help_flag_prints_schema_help() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "--bogus",
        "-h",
    ]);

    assert!(out.status.success());
    let page = stdout(&out);
    assert!(page.starts_with("Calculate the sum of two integers\n\nOptions:\n"));
    assert!(page.contains("-s x y, --sum=x,y"));
}

// ---------------------------------------------------------------------------
// help and check
// ---------------------------------------------------------------------------

#[test]
fn help_prints_page() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&["help", "--schema", schema.to_str().unwrap()]);

    assert!(out.status.success());
    let page = stdout(&out);
    assert!(page.contains("Returns the sum of x and y (required)"));
    assert!(page.contains("-q, --quiet"));
    assert!(page.trim_end().ends_with("Terminate option list."));
}

#[test]
fn check_summarizes_valid_schema() {
    let dir = TempDir::new().unwrap();
    let schema = write_calc_schema(dir.path());
    let out = optparse(&["check", "--schema", schema.to_str().unwrap()]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("with 2 option(s), 1 required."));
}

#[test]
fn check_rejects_duplicate_flags() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.json");
    fs::write(
        &path,
        r#"{"options": [{"flags": ["f", "file"]}, {"flags": ["force", "f"]}]}"#,
    )
    .unwrap();

    let out = optparse(&["check", "--schema", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(
        stderr(&out).contains("duplicate option flag: f"),
        "stderr: {}",
        stderr(&out)
    );
}

#[test]
fn missing_schema_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let out = optparse(&["help", "--schema", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error: "));
}
