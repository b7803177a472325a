//! Resolve one async runner at startup and drive a single entry point with it.
//!
//! Resolution walks a fixed list of providers (tokio multi-thread runtime,
//! the minimal `pollster` executor, then the tokio runtime entered on this
//! thread or a fresh current-thread one) and takes the first that is available. Running out of
//! providers is fatal and reported distinctly from entry-point failures.
//!
//! - **[`resolve`]**: strategies, providers, and the resolved [`resolve::Runner`].
//! - **[`host`]**: the line-input collaborator the entry point awaits.
//! - **[`entry`]**: the entry point itself.
//! - **[`launch`]**: resolve, then run the entry point exactly once.

pub mod config;
pub mod entry;
pub mod exit_codes;
pub mod host;
pub mod launch;
pub mod logging;
pub mod resolve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
