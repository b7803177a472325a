//! Markup integration points: exact substring containment in the HTML page.

use std::path::Path;

use crate::checks::{missing_substrings, read_artifact};
use crate::error::SmokeError;

/// Fail unless the document at `path` contains every marker verbatim.
pub fn check_markup(path: &Path, markers: &[String]) -> Result<(), SmokeError> {
    let text = read_artifact(path)?;
    let missing = missing_substrings(&text, markers);
    if !missing.is_empty() {
        return Err(SmokeError::AssertionFailure {
            path: path.to_path_buf(),
            missing,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkupConfig;
    use crate::error::ErrorKind;
    use crate::test_support::{ProjectFixture, VALID_INDEX_HTML};

    #[test]
    fn passes_when_all_markers_present() {
        let project = ProjectFixture::new().expect("fixture");
        let cfg = MarkupConfig::default();
        check_markup(&project.path("src/index.html"), &cfg.markers).expect("markup ok");
    }

    #[test]
    fn missing_run_button_is_assertion_failure() {
        let project = ProjectFixture::new().expect("fixture");
        let html = VALID_INDEX_HTML.replace(r#"id="run""#, r#"id="go""#);
        project.write("src/index.html", &html).expect("write");

        let cfg = MarkupConfig::default();
        let err = check_markup(&project.path("src/index.html"), &cfg.markers)
            .expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::AssertionFailure);
        match err {
            SmokeError::AssertionFailure { missing, .. } => {
                assert_eq!(missing, vec![r#"id="run""#.to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn match_is_exact_not_fuzzy() {
        let project = ProjectFixture::new().expect("fixture");
        let html = VALID_INDEX_HTML.replace(r#"textarea id="code""#, r#"textarea  id="code""#);
        project.write("src/index.html", &html).expect("write");

        let cfg = MarkupConfig::default();
        let err = check_markup(&project.path("src/index.html"), &cfg.markers)
            .expect_err("extra whitespace must not match");
        assert_eq!(err.kind(), ErrorKind::AssertionFailure);
    }

    #[test]
    fn absent_document_is_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = check_markup(&temp.path().join("index.html"), &MarkupConfig::default().markers)
            .expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::MissingFile);
    }
}
