//! Structural smoke checks for a code-playground project layout.
//!
//! Each check opens one artifact relative to a project root and asserts a
//! shallow property of it (substring presence, JSON key shape). Checks are
//! independent: they share no state, never write, and may run in any order.
//!
//! - **[`checks`]**: the three checks plus feedback-pattern safety rules.
//! - **[`config`]**: `smoke.toml` with artifact paths and expected literals.
//! - **[`report`]**: per-check outcomes, printed and optionally persisted.

pub mod checks;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
