//! Test-only helpers: scripted hosts, configs, and a self-waking future.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use anyhow::{Result, anyhow};

use crate::config::RunloopConfig;
use crate::host::Host;
use crate::resolve::Strategy;

/// Host that answers from a queue and records every prompt it was shown.
///
/// `Err(message)` entries fail the call with `message`.
pub struct ScriptedHost {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl Host for ScriptedHost {
    async fn get_input(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        let next = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err("scripted host exhausted".to_string()));
        next.map_err(|message| anyhow!(message))
    }
}

/// Default config with `strategies` disabled.
pub fn config_without(strategies: &[Strategy]) -> RunloopConfig {
    RunloopConfig {
        disabled: strategies.to_vec(),
        ..RunloopConfig::default()
    }
}

/// Future that returns `Pending` `n` times, waking itself each time, then
/// resolves to the number of pending polls.
pub struct YieldTimes {
    remaining: usize,
    pending_polls: usize,
}

impl YieldTimes {
    pub fn new(n: usize) -> Self {
        Self {
            remaining: n,
            pending_polls: 0,
        }
    }
}

impl Future for YieldTimes {
    type Output = usize;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<usize> {
        if self.remaining == 0 {
            return Poll::Ready(self.pending_polls);
        }
        self.remaining -= 1;
        self.pending_polls += 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
