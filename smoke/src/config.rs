//! Smoke configuration stored in `smoke.toml` at the project root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "smoke.toml";

/// Smoke configuration (TOML).
///
/// Every field has a default matching the playground layout, so the file is
/// optional. Paths are relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SmokeConfig {
    pub markup: MarkupConfig,
    pub source: SourceConfig,
    pub config_shape: ConfigShapeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MarkupConfig {
    pub path: PathBuf,
    /// Literal substrings the document must contain.
    pub markers: Vec<String>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/index.html"),
            markers: vec![
                r#"id="instructions-content""#.to_string(),
                r#"textarea id="code""#.to_string(),
                r#"id="run""#.to_string(),
                r#"id="terminal-output""#.to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
    /// Identifier that must appear in the script.
    pub required: String,
    /// At least one of these must appear as well.
    pub any_of: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/main.js"),
            required: "runtimeAdapter".to_string(),
            any_of: vec![
                "probeRuntime".to_string(),
                "Runtime probe timed out".to_string(),
            ],
        }
    }
}

/// How strictly `runtime.recommended` is checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndpointPolicy {
    /// Any string that is non-empty after trimming.
    #[default]
    Loose,
    /// Non-empty and referencing `pinned_host`.
    Pinned,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfigShapeConfig {
    pub path: PathBuf,
    pub endpoint: EndpointPolicy,
    pub pinned_host: String,
    /// Reject feedback patterns prone to catastrophic backtracking. Opt-in.
    pub regex_safety: bool,
}

impl Default for ConfigShapeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/config/sample.json"),
            endpoint: EndpointPolicy::Loose,
            pinned_host: "cdn.jsdelivr.net".to_string(),
            regex_safety: false,
        }
    }
}

impl SmokeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.markup.markers.is_empty() {
            return Err(anyhow!("markup.markers must be a non-empty array"));
        }
        if self.markup.markers.iter().any(|m| m.is_empty()) {
            return Err(anyhow!("markup.markers must not contain empty strings"));
        }
        if self.source.required.trim().is_empty() {
            return Err(anyhow!("source.required must be non-empty"));
        }
        if self.source.any_of.is_empty() || self.source.any_of.iter().any(|s| s.is_empty()) {
            return Err(anyhow!("source.any_of must be a non-empty array of non-empty strings"));
        }
        if self.config_shape.endpoint == EndpointPolicy::Pinned
            && self.config_shape.pinned_host.trim().is_empty()
        {
            return Err(anyhow!("config_shape.pinned_host must be set when endpoint = \"pinned\""));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SmokeConfig::default()`.
pub fn load_config(path: &Path) -> Result<SmokeConfig> {
    if !path.exists() {
        let cfg = SmokeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SmokeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
