//! Smoke checks for a code-playground project layout.
//!
//! Verifies that the page markup, the main script, and the sample
//! configuration expose the integration points the playground relies on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use smoke::checks::{CheckKind, run_checks};
use smoke::config::{CONFIG_FILE, EndpointPolicy, SmokeConfig, load_config};
use smoke::exit_codes;
use smoke::logging;
use smoke::report::write_report;

#[derive(Parser)]
#[command(
    name = "smoke",
    version,
    about = "Structural smoke checks for a code-playground project"
)]
struct Cli {
    /// Project root the artifact paths are relative to.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/smoke.toml`; missing file means defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print each check with the artifact it reads.
    List,
    /// Run checks and report pass/fail per check.
    Check {
        /// Run only these checks (comma separated).
        #[arg(long, value_delimiter = ',')]
        only: Vec<CheckKind>,
        /// Write the JSON report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Require `runtime.recommended` to reference the pinned host.
        #[arg(long)]
        pinned: bool,
    },
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
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(CONFIG_FILE));
    let mut cfg = load_config(&config_path).context("load smoke config")?;
    debug!(config = %config_path.display(), "config loaded");

    match cli.command {
        Command::List => {
            cmd_list(&cfg);
            Ok(exit_codes::OK)
        }
        Command::Check {
            only,
            report,
            pinned,
        } => {
            if pinned {
                cfg.config_shape.endpoint = EndpointPolicy::Pinned;
                cfg.validate()?;
            }
            cmd_check(&cli.root, &cfg, &only, report.as_deref())
        }
    }
}

fn cmd_list(cfg: &SmokeConfig) {
    println!("markup {}", cfg.markup.path.display());
    println!("config {}", cfg.config_shape.path.display());
    println!("source {}", cfg.source.path.display());
}

fn cmd_check(
    root: &Path,
    cfg: &SmokeConfig,
    only: &[CheckKind],
    report_path: Option<&Path>,
) -> Result<i32> {
    let report = run_checks(root, cfg, only);
    for outcome in &report.checks {
        println!("{}", outcome.summary_line());
    }
    if let Some(path) = report_path {
        write_report(path, &report)?;
        info!(report = %path.display(), "report written");
    }

    let failed = report.failed_count();
    println!(
        "smoke: {} passed, {} failed",
        report.checks.len() - failed,
        failed
    );
    if failed > 0 {
        return Ok(exit_codes::FAILED);
    }
    Ok(exit_codes::OK)
}
