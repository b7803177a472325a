//! Stable exit codes for smoke CLI commands.

/// Every selected check passed.
pub const OK: i32 = 0;
/// At least one check failed.
pub const FAILED: i32 = 1;
/// Invalid invocation or unreadable `smoke.toml`.
pub const INVALID: i32 = 2;
