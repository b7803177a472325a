//! Resolve an async runner and drive the line-echo entry point.
//!
//! Exit codes distinguish "no async runner present" from entry-point failures,
//! see [`runloop::exit_codes`].

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use runloop::config::{CONFIG_FILE, RunloopConfig, load_config};
use runloop::exit_codes;
use runloop::host::StdinHost;
use runloop::launch::{LaunchError, launch};
use runloop::logging;
use runloop::resolve::{Strategy, probe_all};

#[derive(Parser)]
#[command(
    name = "runloop",
    version,
    about = "Resolve an async runner and drive one entry point to completion"
)]
struct Cli {
    /// Config file (missing file means defaults).
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Skip a strategy during resolution (repeatable).
    #[arg(long, global = true)]
    disable: Vec<Strategy>,

    /// Worker threads for the primary runtime.
    #[arg(long, global = true)]
    worker_threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prompt for one line on stdin and echo it.
    Run,
    /// Report which strategies are available, in preference order.
    Probe,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let mut cfg = load_config(&cli.config).context("load runloop config")?;
    merge_cli(&mut cfg, &cli);
    cfg.validate()?;
    debug!(config = ?cfg, "config resolved");

    match cli.command {
        Command::Run => Ok(cmd_run(&cfg)),
        Command::Probe => Ok(cmd_probe(&cfg)),
    }
}

fn merge_cli(cfg: &mut RunloopConfig, cli: &Cli) {
    for strategy in &cli.disable {
        if !cfg.is_disabled(*strategy) {
            cfg.disabled.push(*strategy);
        }
    }
    if cli.worker_threads.is_some() {
        cfg.worker_threads = cli.worker_threads;
    }
}

fn cmd_run(cfg: &RunloopConfig) -> i32 {
    let mut stdout = io::stdout();
    match launch(cfg, &StdinHost, &mut stdout) {
        Ok(strategy) => {
            debug!(%strategy, "entry point completed");
            exit_codes::OK
        }
        Err(LaunchError::Resolve(err)) => {
            eprintln!("{err}");
            exit_codes::NO_RUNNER
        }
        Err(LaunchError::Entry(err)) => {
            eprintln!("{:#}", err);
            exit_codes::ENTRY_FAILED
        }
    }
}

fn cmd_probe(cfg: &RunloopConfig) -> i32 {
    let mut selected = None;
    for (strategy, result) in probe_all(cfg) {
        match result {
            Ok(()) => {
                println!("probe: {strategy} available");
                selected.get_or_insert(strategy);
            }
            Err(err) => println!("probe: {strategy} unavailable ({err})"),
        }
    }
    match selected {
        Some(strategy) => {
            println!("probe: selected {strategy}");
            exit_codes::OK
        }
        None => {
            println!("probe: no async runner available");
            exit_codes::NO_RUNNER
        }
    }
}
