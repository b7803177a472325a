//! Line-input collaborator consumed by the entry point.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::thread;

use anyhow::{Context, Result, bail};
use futures::channel::oneshot;
use tracing::debug;

/// Source of input lines for the entry point.
pub trait Host {
    /// Show `prompt` and resolve to the next line of input, without its line ending.
    fn get_input(&self, prompt: &str) -> impl Future<Output = Result<String>>;
}

/// Host backed by the process's stdin and stdout.
///
/// The blocking read happens on a helper thread and is handed back through a
/// oneshot channel, so the future makes progress under any executor.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinHost;

impl Host for StdinHost {
    async fn get_input(&self, prompt: &str) -> Result<String> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes()).context("write prompt")?;
            stdout.flush().context("flush prompt")?;
        }

        let (tx, rx) = oneshot::channel();
        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let mut line = String::new();
                let result = io::stdin().lock().read_line(&mut line).map(|n| (n, line));
                // Receiver only disappears if the entry point was dropped.
                let _ = tx.send(result);
            })
            .context("spawn stdin reader")?;

        let (read, mut line) = rx
            .await
            .context("stdin reader exited without a result")?
            .context("read stdin")?;
        debug!(bytes = read, "line read");
        if read == 0 {
            bail!("end of input while waiting for a line");
        }
        strip_line_ending(&mut line);
        Ok(line)
    }
}

/// Remove one trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_line_ending_only() {
        let mut unix = "hello\n".to_string();
        strip_line_ending(&mut unix);
        assert_eq!(unix, "hello");

        let mut windows = "hello\r\n".to_string();
        strip_line_ending(&mut windows);
        assert_eq!(windows, "hello");

        let mut blank = "\n\n".to_string();
        strip_line_ending(&mut blank);
        assert_eq!(blank, "\n");

        let mut bare = "hello".to_string();
        strip_line_ending(&mut bare);
        assert_eq!(bare, "hello");
    }
}
