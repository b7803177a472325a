//! Configuration shape: `runtime.recommended` and `feedback.regex`.
//!
//! The structural part is a JSON Schema (Draft 2020-12) embedded in the
//! binary. Endpoint pinning and feedback pattern safety are layered on top
//! because they depend on `smoke.toml`.

use std::path::Path;
use std::sync::LazyLock;

use jsonschema::{Draft, Validator};
use serde_json::Value;
use tracing::debug;

use crate::checks::{read_artifact, regex_safety};
use crate::config::{ConfigShapeConfig, EndpointPolicy};
use crate::error::SmokeError;

const SHAPE_SCHEMA: &str = include_str!("../../schemas/config_shape.v1.schema.json");

/// Compiled once per process; the error is kept as text so it can be reported per call.
static SHAPE_VALIDATOR: LazyLock<Result<Validator, String>> = LazyLock::new(|| {
    let schema: Value = serde_json::from_str(SHAPE_SCHEMA).map_err(|err| err.to_string())?;
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|err| err.to_string())
});

/// Fail unless the JSON file at `path` has the runtime endpoint and feedback rules.
pub fn check_config_shape(path: &Path, cfg: &ConfigShapeConfig) -> Result<(), SmokeError> {
    let text = read_artifact(path)?;
    let instance: Value = serde_json::from_str(&text).map_err(|source| SmokeError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_shape(path, &instance)?;

    let recommended = instance
        .pointer("/runtime/recommended")
        .and_then(Value::as_str)
        .unwrap_or_default();
    debug!(recommended, policy = ?cfg.endpoint, "runtime endpoint");
    if cfg.endpoint == EndpointPolicy::Pinned && !recommended.contains(cfg.pinned_host.as_str()) {
        return Err(SmokeError::schema_violation(
            path,
            format!("runtime.recommended does not reference {}", cfg.pinned_host),
        ));
    }

    if cfg.regex_safety {
        let rules = instance.pointer("/feedback/regex").unwrap_or(&Value::Null);
        let violations = regex_safety::check_rules(rules);
        if !violations.is_empty() {
            return Err(SmokeError::SchemaViolation {
                path: path.to_path_buf(),
                violations,
            });
        }
    }
    Ok(())
}

/// Validate `instance` against the embedded shape schema.
fn validate_shape(path: &Path, instance: &Value) -> Result<(), SmokeError> {
    let compiled = SHAPE_VALIDATOR
        .as_ref()
        .map_err(|message| SmokeError::InvalidSchema(message.clone()))?;
    let violations: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !violations.is_empty() {
        return Err(SmokeError::SchemaViolation {
            path: path.to_path_buf(),
            violations,
        });
    }
    Ok(())
}
