//! CLI tests for `smoke check`.
//!
//! Spawns the smoke binary against scratch projects and verifies exit codes,
//! per-check output, and the persisted report.

use std::fs;
use std::process::Command;

use smoke::exit_codes;
use smoke::test_support::{ProjectFixture, VALID_INDEX_HTML};

fn smoke(project: &ProjectFixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_smoke"));
    cmd.arg("--root").arg(project.root());
    cmd
}

#[test]
fn valid_project_exits_ok() {
    let project = ProjectFixture::new().expect("fixture");
    let output = smoke(&project).arg("check").output().expect("smoke check");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("check: markup src/index.html ok"), "{stdout}");
    assert!(stdout.contains("smoke: 3 passed, 0 failed"), "{stdout}");
}

#[test]
fn missing_run_button_exits_failed_and_reports() {
    let project = ProjectFixture::new().expect("fixture");
    project
        .write("src/index.html", &VALID_INDEX_HTML.replace(r#"id="run""#, ""))
        .expect("write");
    let report_path = project.path("out/report.json");

    let output = smoke(&project)
        .arg("check")
        .arg("--report")
        .arg(&report_path)
        .output()
        .expect("smoke check");

    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FAIL assertion_failure"), "{stdout}");

    let raw = fs::read_to_string(&report_path).expect("report");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(report["checks"][0]["failure"]["kind"], "assertion_failure");
    assert_eq!(report["checks"][1]["passed"], true);
}

#[test]
fn only_skips_unselected_checks() {
    let project = ProjectFixture::new().expect("fixture");
    project.remove("src/main.js").expect("remove");

    let output = smoke(&project)
        .args(["check", "--only", "markup,config"])
        .output()
        .expect("smoke check");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn invalid_config_exits_invalid() {
    let project = ProjectFixture::new().expect("fixture");
    project
        .write("smoke.toml", "[source]\nany_of = []\n")
        .expect("write");

    let status = smoke(&project).arg("check").status().expect("smoke check");
    assert_eq!(status.code(), Some(exit_codes::INVALID));
}
