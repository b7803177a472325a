//! Runloop configuration stored in `runloop.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::resolve::Strategy;

pub const CONFIG_FILE: &str = "runloop.toml";

/// Runloop configuration (TOML). Missing fields default to "everything enabled".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RunloopConfig {
    /// Strategies to skip during resolution, e.g. `["primary"]`.
    pub disabled: Vec<Strategy>,
    /// Worker threads for the primary runtime; tokio's default when unset.
    pub worker_threads: Option<usize>,
}

impl RunloopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == Some(0) {
            return Err(anyhow!("worker_threads must be > 0"));
        }
        Ok(())
    }

    pub fn is_disabled(&self, strategy: Strategy) -> bool {
        self.disabled.contains(&strategy)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RunloopConfig::default()`.
pub fn load_config(path: &Path) -> Result<RunloopConfig> {
    if !path.exists() {
        return Ok(RunloopConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RunloopConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
