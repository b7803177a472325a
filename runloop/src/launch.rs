//! Resolve a runner and drive the entry point with it exactly once.

use std::io::Write;

use thiserror::Error;

use crate::config::RunloopConfig;
use crate::entry::echo_line;
use crate::host::Host;
use crate::resolve::{ResolveError, Strategy, resolve_runner};

#[derive(Debug, Error)]
pub enum LaunchError {
    /// No runner was resolved; the entry point never started.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The entry point started and failed.
    #[error(transparent)]
    Entry(anyhow::Error),
}

/// Resolve a runner, then block until the entry point finishes.
///
/// Returns the strategy that drove the entry point.
pub fn launch<H: Host, W: Write>(
    config: &RunloopConfig,
    host: &H,
    out: &mut W,
) -> Result<Strategy, LaunchError> {
    let runner = resolve_runner(config)?;
    let strategy = runner.strategy();
    runner
        .run(echo_line(host, out))
        .map_err(LaunchError::Entry)?;
    Ok(strategy)
}
