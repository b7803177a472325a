//! Safety rules for feedback patterns under `feedback.regex`.
//!
//! Patterns are authored by hand and later run against learner output, so
//! shapes prone to catastrophic backtracking are rejected up front. The rules
//! are deliberately syntactic: patterns target the browser's regex dialect and
//! are not compiled here.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Largest repetition bound accepted in `{n}`, `{n,}` or `{n,m}`.
pub const MAX_REPETITION: u64 = 1000;

/// Check every pattern found under `rules` and return human-readable violations.
///
/// `rules` may be a single pattern string, an array of strings or rule objects,
/// or a map of named strings or rule objects. Rule objects carry their pattern
/// in a `pattern` field; objects without one are placeholders and are skipped.
pub fn check_rules(rules: &Value) -> Vec<String> {
    let mut violations = Vec::new();
    for (location, pattern) in collect_patterns(rules, &mut violations) {
        if let Err(reason) = validate_pattern(pattern) {
            violations.push(format!("{location}: {reason}"));
        }
    }
    violations
}

/// Validate a single pattern, returning the reason it is rejected.
pub fn validate_pattern(pattern: &str) -> Result<(), String> {
    static NESTED_QUANTIFIER: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\((?:[^()\\]|\\.)*[+*](?:[^()\\]|\\.)*\)(?:[+*]|\{\d+,\})").unwrap()
    });
    static REPETITION: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\{(\d+)(?:,(\d*))?\}").unwrap());

    if pattern.trim().is_empty() {
        return Err("empty pattern".to_string());
    }
    if NESTED_QUANTIFIER.is_match(pattern) {
        return Err("nested quantifiers can cause catastrophic backtracking".to_string());
    }
    for caps in REPETITION.captures_iter(pattern) {
        if is_escaped(pattern, caps.get(0).map_or(0, |m| m.start())) {
            continue;
        }
        let too_large = [caps.get(1), caps.get(2)]
            .into_iter()
            .flatten()
            .filter(|bound| !bound.as_str().is_empty())
            .any(|bound| {
                bound
                    .as_str()
                    .parse::<u64>()
                    .map_or(true, |n| n > MAX_REPETITION)
            });
        if too_large {
            return Err(format!(
                "very large repetition {} (limit {MAX_REPETITION})",
                &caps[0]
            ));
        }
    }
    Ok(())
}

/// True when the byte at `idx` follows an odd run of backslashes.
fn is_escaped(pattern: &str, idx: usize) -> bool {
    let backslashes = pattern.as_bytes()[..idx]
        .iter()
        .rev()
        .take_while(|b| **b == b'\\')
        .count();
    backslashes % 2 == 1
}

fn collect_patterns<'a>(rules: &'a Value, violations: &mut Vec<String>) -> Vec<(String, &'a str)> {
    let mut found = Vec::new();
    match rules {
        Value::String(pattern) => found.push(("feedback.regex".to_string(), pattern.as_str())),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                collect_rule(format!("feedback.regex[{idx}]"), item, &mut found, violations);
            }
        }
        Value::Object(map) => {
            for (name, item) in map {
                collect_rule(format!("feedback.regex.{name}"), item, &mut found, violations);
            }
        }
        _ => {}
    }
    found
}

fn collect_rule<'a>(
    location: String,
    rule: &'a Value,
    found: &mut Vec<(String, &'a str)>,
    violations: &mut Vec<String>,
) {
    match rule {
        Value::String(pattern) => found.push((location, pattern.as_str())),
        Value::Object(fields) => match fields.get("pattern") {
            Some(Value::String(pattern)) => found.push((format!("{location}.pattern"), pattern)),
            Some(_) => violations.push(format!("{location}.pattern: must be a string")),
            None => {}
        },
        _ => {}
    }
}
