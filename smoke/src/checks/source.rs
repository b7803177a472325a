//! Source integration marker in the main script.

use std::path::Path;

use crate::checks::read_artifact;
use crate::error::SmokeError;

/// Fail unless the script contains `required` and at least one of `any_of`.
pub fn check_source_marker(
    path: &Path,
    required: &str,
    any_of: &[String],
) -> Result<(), SmokeError> {
    let text = read_artifact(path)?;
    let mut missing = Vec::new();
    if !text.contains(required) {
        missing.push(required.to_string());
    }
    if !any_of.iter().any(|alt| text.contains(alt.as_str())) {
        missing.push(format!("one of [{}]", any_of.join(" | ")));
    }
    if !missing.is_empty() {
        return Err(SmokeError::AssertionFailure {
            path: path.to_path_buf(),
            missing,
        });
    }
    Ok(())
}
