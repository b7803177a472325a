//! Check execution.
//!
//! Runs the selected checks against a project root and records one outcome
//! per check. A failing check never prevents the others from running.

pub mod config_shape;
pub mod markup;
pub mod regex_safety;
pub mod source;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SmokeConfig;
use crate::error::SmokeError;
use crate::report::{CheckOutcome, Report};

/// The three independent smoke checks.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// HTML document exposes the UI element ids.
    Markup,
    /// JSON configuration has the runtime and feedback keys.
    Config,
    /// Script source wires the runtime adapter.
    Source,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [CheckKind::Markup, CheckKind::Config, CheckKind::Source];

    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Markup => "markup",
            CheckKind::Config => "config",
            CheckKind::Source => "source",
        }
    }
}

/// Run one check against `root`.
pub fn run_check(kind: CheckKind, root: &Path, cfg: &SmokeConfig) -> Result<(), SmokeError> {
    match kind {
        CheckKind::Markup => {
            markup::check_markup(&root.join(&cfg.markup.path), &cfg.markup.markers)
        }
        CheckKind::Config => {
            config_shape::check_config_shape(&root.join(&cfg.config_shape.path), &cfg.config_shape)
        }
        CheckKind::Source => source::check_source_marker(
            &root.join(&cfg.source.path),
            &cfg.source.required,
            &cfg.source.any_of,
        ),
    }
}

/// Run the selected checks (all when `only` is empty) and collect outcomes.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn run_checks(root: &Path, cfg: &SmokeConfig, only: &[CheckKind]) -> Report {
    let mut selected: Vec<CheckKind> = if only.is_empty() {
        CheckKind::ALL.to_vec()
    } else {
        only.to_vec()
    };
    selected.sort();
    selected.dedup();

    let mut outcomes = Vec::with_capacity(selected.len());
    for kind in selected {
        let path = artifact_path(kind, cfg);
        let outcome = match run_check(kind, root, cfg) {
            Ok(()) => {
                debug!(check = kind.label(), path = %path.display(), "check passed");
                CheckOutcome::passed(kind, path)
            }
            Err(err) => {
                warn!(check = kind.label(), error = %err, "check failed");
                CheckOutcome::failed(kind, path, &err)
            }
        };
        outcomes.push(outcome);
    }
    Report { checks: outcomes }
}

fn artifact_path(kind: CheckKind, cfg: &SmokeConfig) -> &Path {
    match kind {
        CheckKind::Markup => &cfg.markup.path,
        CheckKind::Config => &cfg.config_shape.path,
        CheckKind::Source => &cfg.source.path,
    }
}

/// Read an artifact as UTF-8, distinguishing absence from read failure.
pub(crate) fn read_artifact(path: &Path) -> Result<String, SmokeError> {
    if !path.is_file() {
        return Err(SmokeError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| SmokeError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Return every needle not contained in `text`, preserving order.
pub(crate) fn missing_substrings(text: &str, needles: &[String]) -> Vec<String> {
    needles
        .iter()
        .filter(|needle| !text.contains(needle.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::ProjectFixture;

    #[test]
    fn valid_project_passes_all_checks() {
        let project = ProjectFixture::new().expect("fixture");
        let report = run_checks(project.root(), &SmokeConfig::default(), &[]);
        assert_eq!(report.checks.len(), 3);
        assert!(report.all_passed(), "report: {report:?}");
    }

    #[test]
    fn one_failure_does_not_block_others() {
        let project = ProjectFixture::new().expect("fixture");
        project.remove("src/index.html").expect("remove");

        let report = run_checks(project.root(), &SmokeConfig::default(), &[]);
        assert!(!report.all_passed());
        let markup = &report.checks[0];
        assert_eq!(markup.check, CheckKind::Markup);
        assert_eq!(
            markup.failure.as_ref().map(|f| f.kind),
            Some(ErrorKind::MissingFile)
        );
        assert!(report.checks[1].passed);
        assert!(report.checks[2].passed);
    }

    #[test]
    fn only_runs_selected_checks_once_in_fixed_order() {
        let project = ProjectFixture::new().expect("fixture");
        let report = run_checks(
            project.root(),
            &SmokeConfig::default(),
            &[CheckKind::Source, CheckKind::Config, CheckKind::Source],
        );
        let kinds: Vec<CheckKind> = report.checks.iter().map(|c| c.check).collect();
        assert_eq!(kinds, vec![CheckKind::Config, CheckKind::Source]);
    }

    #[test]
    fn directory_in_place_of_file_is_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = read_artifact(temp.path()).expect_err("directory is not a file");
        assert_eq!(err.kind(), ErrorKind::MissingFile);
    }
}
