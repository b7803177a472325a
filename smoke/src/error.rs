//! Failure taxonomy shared by all smoke checks.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single check failed.
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("missing file {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("schema violation in {}: {}", .path.display(), .violations.join("; "))]
    SchemaViolation {
        path: PathBuf,
        violations: Vec<String>,
    },

    #[error("{} is missing {}", .path.display(), .missing.join(", "))]
    AssertionFailure { path: PathBuf, missing: Vec<String> },

    #[error("invalid embedded schema: {0}")]
    InvalidSchema(String),
}

/// Serializable discriminant of [`SmokeError`], used in reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingFile,
    Read,
    ParseError,
    SchemaViolation,
    AssertionFailure,
    Internal,
}

impl SmokeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SmokeError::MissingFile { .. } => ErrorKind::MissingFile,
            SmokeError::Read { .. } => ErrorKind::Read,
            SmokeError::Parse { .. } => ErrorKind::ParseError,
            SmokeError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
            SmokeError::AssertionFailure { .. } => ErrorKind::AssertionFailure,
            SmokeError::InvalidSchema(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn schema_violation(path: &Path, violation: impl Into<String>) -> Self {
        SmokeError::SchemaViolation {
            path: path.to_path_buf(),
            violations: vec![violation.into()],
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::MissingFile => "missing_file",
            ErrorKind::Read => "read",
            ErrorKind::ParseError => "parse_error",
            ErrorKind::SchemaViolation => "schema_violation",
            ErrorKind::AssertionFailure => "assertion_failure",
            ErrorKind::Internal => "internal",
        };
        f.write_str(label)
    }
}
