//! Check outcomes and their persisted form.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::checks::CheckKind;
use crate::error::{ErrorKind, SmokeError};

/// Collected check outcomes for one invocation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub checks: Vec<CheckOutcome>,
}

/// Result of running a single check.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub path: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl CheckOutcome {
    pub fn passed(check: CheckKind, path: &Path) -> Self {
        Self {
            check,
            path: path.display().to_string(),
            passed: true,
            failure: None,
        }
    }

    pub fn failed(check: CheckKind, path: &Path, err: &SmokeError) -> Self {
        Self {
            check,
            path: path.display().to_string(),
            passed: false,
            failure: Some(CheckFailure {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }

    /// One-line human summary, e.g. `check: markup src/index.html ok`.
    pub fn summary_line(&self) -> String {
        match &self.failure {
            None => format!("check: {} {} ok", self.check.label(), self.path),
            Some(failure) => format!(
                "check: {} {} FAIL {}: {}",
                self.check.label(),
                self.path,
                failure.kind,
                failure.message
            ),
        }
    }
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|check| !check.passed).count()
    }
}

pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, format!("{contents}\n")).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn failure_line_names_kind() {
        let err = SmokeError::MissingFile {
            path: PathBuf::from("src/main.js"),
        };
        let outcome = CheckOutcome::failed(CheckKind::Source, Path::new("src/main.js"), &err);
        assert_eq!(
            outcome.summary_line(),
            "check: source src/main.js FAIL missing_file: missing file src/main.js"
        );
    }

    #[test]
    fn written_report_is_readable_json() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out").join("report.json");
        let report = Report {
            checks: vec![
                CheckOutcome::passed(CheckKind::Markup, Path::new("src/index.html")),
                CheckOutcome::failed(
                    CheckKind::Config,
                    Path::new("src/config/sample.json"),
                    &SmokeError::SchemaViolation {
                        path: PathBuf::from("src/config/sample.json"),
                        violations: vec!["\"regex\" is a required property".to_string()],
                    },
                ),
            ],
        };
        write_report(&path, &report).expect("write");

        let raw = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["checks"][0]["check"], "markup");
        assert!(value["checks"][0].get("failure").is_none());
        assert_eq!(value["checks"][1]["failure"]["kind"], "schema_violation");

        let loaded: Report = serde_json::from_str(&raw).expect("report");
        assert_eq!(loaded.failed_count(), 1);
    }
}
