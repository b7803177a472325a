//! Stable exit codes for runloop CLI commands.

/// Entry point ran to completion.
pub const OK: i32 = 0;
/// Entry point failed (for example, input could not be read).
pub const ENTRY_FAILED: i32 = 1;
/// Invalid invocation or unreadable `runloop.toml`.
pub const INVALID: i32 = 2;
/// No async runner could be resolved; the entry point never ran.
pub const NO_RUNNER: i32 = 3;
