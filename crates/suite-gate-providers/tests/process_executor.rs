// crates/suite-gate-providers/tests/process_executor.rs
// ============================================================================
// Module: Process Executor Tests
// Description: Tests for exit-status to leaf-outcome mapping.
// ============================================================================
//! ## Overview
//! Validates passed/failed/errored/fatal mapping, output capture, and
//! placeholder substitution using `sh`.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]
#![cfg(unix)]

use suite_gate_core::ExecutionOutcome;
use suite_gate_core::LeafId;
use suite_gate_core::TestExecutor;
use suite_gate_providers::ProcessExecutor;
use suite_gate_providers::ProcessExecutorConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a shell-script executor config; `$1` is the leaf id.
fn shell_config(script: &str) -> ProcessExecutorConfig {
    ProcessExecutorConfig::new(
        "sh",
        vec!["-c".to_string(), script.to_string(), "leaf".to_string(), "{leaf}".to_string()],
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn exit_zero_passes() {
    let executor = ProcessExecutor::new(shell_config("exit 0"));
    assert_eq!(executor.execute(&LeafId::new("t1")), Ok(ExecutionOutcome::Passed));
}

#[test]
fn failure_code_fails_with_captured_output() {
    let executor = ProcessExecutor::new(shell_config("echo \"$1: expected 200\"; exit 1"));
    let outcome = executor.execute(&LeafId::new("t1")).expect("not fatal");
    assert_eq!(outcome, ExecutionOutcome::Failed("exit status 1: t1: expected 200".to_string()));
}

#[test]
fn unmapped_code_errors() {
    let executor = ProcessExecutor::new(shell_config("exit 7"));
    assert_eq!(
        executor.execute(&LeafId::new("t1")),
        Ok(ExecutionOutcome::Errored("exit status 7".to_string()))
    );
}

#[test]
fn fatal_code_aborts() {
    let mut config = shell_config("echo 'endpoint unreachable' >&2; exit 75");
    config.fatal_codes = vec![75];
    let err = ProcessExecutor::new(config).execute(&LeafId::new("t1")).expect_err("fatal");
    assert_eq!(err.detail, "exit status 75: endpoint unreachable");
}

#[test]
fn spawn_failure_is_fatal() {
    let executor =
        ProcessExecutor::new(ProcessExecutorConfig::new("suite-gate-no-such-runner", Vec::new()));
    let err = executor.execute(&LeafId::new("t1")).expect_err("fatal");
    assert!(err.detail.contains("failed to spawn"));
}

#[test]
fn output_is_truncated_to_limit() {
    let mut config = shell_config("printf 'abcdefghijklmnop'; exit 1");
    config.max_output_bytes = 4;
    let outcome = ProcessExecutor::new(config).execute(&LeafId::new("t1")).expect("not fatal");
    assert_eq!(outcome, ExecutionOutcome::Failed("exit status 1: abcd...[truncated]".to_string()));
}

#[test]
fn env_and_working_dir_are_applied() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = shell_config("[ \"$SUITE_TARGET\" = local ] && [ \"$(pwd -P)\" = \"$EXPECTED_DIR\" ]");
    let canonical = dir.path().canonicalize().expect("canonicalize");
    config.env.insert("SUITE_TARGET".to_string(), "local".to_string());
    config.env.insert("EXPECTED_DIR".to_string(), canonical.display().to_string());
    config.working_dir = Some(dir.path().to_path_buf());
    assert_eq!(ProcessExecutor::new(config).execute(&LeafId::new("t1")), Ok(ExecutionOutcome::Passed));
}

#[test]
fn output_beyond_pipe_capacity_is_bounded_without_blocking() {
    let mut config = shell_config(
        "head -c 200000 /dev/zero | tr '\\0' a; head -c 200000 /dev/zero | tr '\\0' b >&2; exit 1",
    );
    config.max_output_bytes = 8;
    let outcome = ProcessExecutor::new(config).execute(&LeafId::new("t1")).expect("not fatal");
    assert_eq!(outcome, ExecutionOutcome::Failed("exit status 1: aaaaaaaa...[truncated]".to_string()));
}
