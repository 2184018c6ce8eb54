//! Integration tests driving the `lkp` binary.

use std::process::{Command, Output};

fn lkp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lkp"))
        .args(args)
        .output()
        .expect("run lkp")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn presets_lists_openexr() {
    let output = lkp(&["presets"]);
    assert!(output.status.success());
    assert!(stdout(&output).lines().any(|line| line == "openexr"));
}

#[test]
fn plan_json_for_windows_debug() {
    let output = lkp(&[
        "plan",
        "--preset",
        "openexr",
        "--platform",
        "windows",
        "--debug",
        "--lib-version",
        "3.1.5",
        "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let plan: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    let components = plan["components"].as_array().expect("components");
    assert_eq!(components.len(), 8);
    let core = components
        .iter()
        .find(|c| c["name"] == "OpenEXRCore")
        .expect("OpenEXRCore");
    assert_eq!(core["library"], "OpenEXRCore-3_1_d");
    assert_eq!(core["external"], serde_json::json!(["zlib::zlib"]));
}

#[test]
fn check_fails_on_broken_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "components:\n  - name: a\n    requires: [ghost]\n  - name: a\n").expect("write");

    let output = lkp(&["check", "--manifest", path.to_str().expect("utf8 path")]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("ghost"), "got: {text}");
    assert!(text.contains("duplicate component name"), "got: {text}");
}

#[test]
fn graph_prints_dot() {
    let output = lkp(&["graph", "--preset", "openexr"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("digraph"));
    assert!(text.contains("OpenEXRUtil"));
}

#[test]
fn plan_reports_cycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cycle.yaml");
    std::fs::write(&path, "components:\n  - name: a\n    requires: [b]\n  - name: b\n    requires: [a]\n").expect("write");

    let output = lkp(&["plan", "--manifest", path.to_str().expect("utf8 path")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cyclic"));
}
