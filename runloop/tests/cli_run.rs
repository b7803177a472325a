//! CLI tests for `runloop run` and `runloop probe`.
//!
//! Spawns the runloop binary with piped stdin and verifies output and exit
//! codes for a resolved runner, an exhausted resolution, and failed input.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use runloop::exit_codes;

fn runloop_with_stdin(args: &[&str], stdin: &str) -> Output {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_runloop"))
        .current_dir(temp.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn runloop");
    // The child may exit before reading (no runner), so a broken pipe is fine.
    let _ = child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes());
    child.wait_with_output().expect("runloop output")
}

#[test]
fn run_echoes_the_line() {
    let output = runloop_with_stdin(&["run"], "hello\n");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "what? Your line was: hello\n"
    );
}

#[test]
fn run_with_embedded_only_behaves_the_same() {
    let output = runloop_with_stdin(
        &["run", "--disable", "primary", "--disable", "loop-fallback"],
        "hello\n",
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "what? Your line was: hello\n"
    );
}

#[test]
fn run_with_loop_fallback_only_echoes_the_line() {
    let output = runloop_with_stdin(
        &["run", "--disable", "primary", "--disable", "embedded"],
        "hello\n",
    );

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "what? Your line was: hello\n"
    );
}

#[test]
fn run_without_any_strategy_exits_no_runner() {
    let output = runloop_with_stdin(
        &[
            "run",
            "--disable",
            "primary",
            "--disable",
            "embedded",
            "--disable",
            "loop-fallback",
        ],
        "hello\n",
    );

    assert_eq!(output.status.code(), Some(exit_codes::NO_RUNNER));
    assert!(output.stdout.is_empty(), "prompt must not be shown");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no async runner available"), "{stderr}");
}

#[test]
fn run_on_closed_stdin_exits_entry_failed() {
    let output = runloop_with_stdin(&["run"], "");

    assert_eq!(output.status.code(), Some(exit_codes::ENTRY_FAILED));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("end of input"), "{stderr}");
}

#[test]
fn probe_selects_primary_first() {
    let output = runloop_with_stdin(&["probe"], "");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("probe: primary available"), "{stdout}");
    assert!(stdout.contains("probe: loop-fallback available"), "{stdout}");
    assert!(stdout.ends_with("probe: selected primary\n"), "{stdout}");
}
