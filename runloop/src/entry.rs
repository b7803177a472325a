//! The single async entry point driven by the resolved runner.

use std::io::Write;

use anyhow::{Context, Result};

use crate::host::Host;

pub const PROMPT: &str = "what? ";

/// Ask the host for one line and echo it back as `Your line was: <line>`.
///
/// Errors from the host are returned unchanged.
pub async fn echo_line<H: Host, W: Write>(host: &H, out: &mut W) -> Result<()> {
    let line = host.get_input(PROMPT).await?;
    writeln!(out, "Your line was: {line}").context("write result line")?;
    out.flush().context("flush result line")?;
    Ok(())
}
