//! Async runner resolution.
//!
//! Each [`Provider`] probes one way of driving a future to completion and
//! returns either a [`Runner`] or the reason it is unavailable. Resolution
//! walks [`PROVIDERS`] in order and keeps the first runner; unavailable
//! providers are logged and skipped. Only exhausting the list is an error.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, info, instrument};

use crate::config::RunloopConfig;

/// Ways of driving a future to completion, in preference order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Fresh multi-threaded tokio runtime, `Runtime::block_on`.
    Primary,
    /// Minimal `pollster` executor with no reactor.
    Embedded,
    /// Tokio runtime entered on this thread, or a fresh current-thread one.
    LoopFallback,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Primary => "primary",
            Strategy::Embedded => "embedded",
            Strategy::LoopFallback => "loop-fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a single provider could not supply a runner. Recovered by trying the next one.
#[derive(Debug, Error)]
pub enum FacilityUnavailable {
    #[error("disabled by configuration")]
    Disabled,
    #[error("build tokio runtime: {0}")]
    RuntimeBuild(#[source] std::io::Error),
    #[error("build current-thread tokio runtime: {0}")]
    LoopBuild(#[source] std::io::Error),
}

/// One failed probe, kept for the fatal error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub strategy: Strategy,
    pub reason: String,
}

/// Fatal: no provider could supply a runner.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no async runner available ({})", describe_failures(.attempts))]
    ImportResolutionFailure { attempts: Vec<ProbeFailure> },
}

fn describe_failures(attempts: &[ProbeFailure]) -> String {
    attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.strategy, attempt.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

enum Driver {
    Runtime(Runtime),
    Pollster,
    Handle(Handle),
}

/// A resolved capability that drives one future to completion on the calling thread.
pub struct Runner {
    strategy: Strategy,
    driver: Driver,
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl Runner {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Block the calling thread until `future` completes.
    ///
    /// Consumes the runner: each resolved runner drives exactly one future.
    /// Must not be called from inside an async context.
    pub fn run<F: Future>(self, future: F) -> F::Output {
        debug!(strategy = %self.strategy, "driving entry point");
        match self.driver {
            Driver::Runtime(runtime) => runtime.block_on(future),
            Driver::Pollster => pollster::block_on(future),
            // On a current-thread runtime the handle cannot drive IO or timers;
            // futures that only wait on channels still complete.
            Driver::Handle(handle) => handle.block_on(future),
        }
    }
}

/// A named probe for one [`Strategy`].
#[derive(Clone, Copy)]
pub struct Provider {
    pub strategy: Strategy,
    pub probe: fn(&RunloopConfig) -> Result<Runner, FacilityUnavailable>,
}

/// Providers in fixed preference order.
pub const PROVIDERS: [Provider; 3] = [
    Provider {
        strategy: Strategy::Primary,
        probe: probe_primary,
    },
    Provider {
        strategy: Strategy::Embedded,
        probe: probe_embedded,
    },
    Provider {
        strategy: Strategy::LoopFallback,
        probe: probe_loop_fallback,
    },
];

fn probe_primary(config: &RunloopConfig) -> Result<Runner, FacilityUnavailable> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("runloop-worker");
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder.build().map_err(FacilityUnavailable::RuntimeBuild)?;
    Ok(Runner {
        strategy: Strategy::Primary,
        driver: Driver::Runtime(runtime),
    })
}

fn probe_embedded(_config: &RunloopConfig) -> Result<Runner, FacilityUnavailable> {
    Ok(Runner {
        strategy: Strategy::Embedded,
        driver: Driver::Pollster,
    })
}

fn probe_loop_fallback(_config: &RunloopConfig) -> Result<Runner, FacilityUnavailable> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(Runner {
            strategy: Strategy::LoopFallback,
            driver: Driver::Handle(handle),
        });
    }
    debug!("no runtime entered on this thread, building a current-thread one");
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FacilityUnavailable::LoopBuild)?;
    Ok(Runner {
        strategy: Strategy::LoopFallback,
        driver: Driver::Runtime(runtime),
    })
}

/// Resolve a runner from [`PROVIDERS`].
pub fn resolve_runner(config: &RunloopConfig) -> Result<Runner, ResolveError> {
    resolve_with(&PROVIDERS, config)
}

/// Resolve a runner from `providers`, first available wins.
#[instrument(skip_all, fields(disabled = ?config.disabled))]
pub fn resolve_with(
    providers: &[Provider],
    config: &RunloopConfig,
) -> Result<Runner, ResolveError> {
    let mut attempts = Vec::with_capacity(providers.len());
    for provider in providers {
        match probe(provider, config) {
            Ok(runner) => {
                info!(strategy = %runner.strategy(), "async runner resolved");
                return Ok(runner);
            }
            Err(err) => {
                debug!(strategy = %provider.strategy, reason = %err, "async runner unavailable");
                attempts.push(ProbeFailure {
                    strategy: provider.strategy,
                    reason: err.to_string(),
                });
            }
        }
    }
    Err(ResolveError::ImportResolutionFailure { attempts })
}

/// Probe every provider without stopping at the first success.
pub fn probe_all(config: &RunloopConfig) -> Vec<(Strategy, Result<(), FacilityUnavailable>)> {
    PROVIDERS
        .iter()
        .map(|provider| (provider.strategy, probe(provider, config).map(drop)))
        .collect()
}

fn probe(provider: &Provider, config: &RunloopConfig) -> Result<Runner, FacilityUnavailable> {
    if config.is_disabled(provider.strategy) {
        return Err(FacilityUnavailable::Disabled);
    }
    (provider.probe)(config)
}
