// crates/suite-gate-providers/src/process.rs
// ============================================================================
// Module: Process Test Executor
// Description: Test executor that runs each leaf as an external command.
// Purpose: Map process exit status onto leaf outcomes.
// Dependencies: suite-gate-core, serde
// ============================================================================

//! ## Overview
//! The process executor runs `program args...` once per leaf with every
//! `{leaf}` placeholder in `args` replaced by the leaf identifier. Exit
//! status decides the outcome:
//! - `0` passed;
//! - a configured failure code failed;
//! - a configured fatal code, or failure to spawn the program, is fatal and
//!   aborts the run;
//! - any other status (including termination by signal) errored.
//!
//! Combined stdout and stderr, truncated to `max_output_bytes`, becomes the
//! outcome detail. Each stream is read through a bound of `max_output_bytes`
//! so memory stays bounded however much the leaf prints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use serde::Deserialize;
use suite_gate_core::ExecutionOutcome;
use suite_gate_core::FatalExecutorError;
use suite_gate_core::LeafId;
use suite_gate_core::TestExecutor;

use crate::capture::BoundedOutput;
use crate::capture::lossy_truncated;
use crate::capture::run_bounded;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Placeholder replaced by the leaf identifier in executor arguments.
pub const LEAF_PLACEHOLDER: &str = "{leaf}";

/// Configuration for the process executor.
///
/// # Invariants
/// - `failure_codes` and `fatal_codes` are disjoint and never contain `0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessExecutorConfig {
    /// Program to execute per leaf.
    pub program: String,
    /// Arguments; `{leaf}` is substituted.
    #[serde(default)]
    pub args: Vec<String>,
    /// Exit codes recorded as assertion failures.
    #[serde(default = "default_failure_codes")]
    pub failure_codes: Vec<i32>,
    /// Exit codes that abort the whole run.
    #[serde(default)]
    pub fatal_codes: Vec<i32>,
    /// Maximum captured output bytes kept as outcome detail.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
    /// Optional working directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables for each leaf process.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Default exit codes treated as assertion failures.
fn default_failure_codes() -> Vec<i32> {
    vec![1]
}

/// Default output capture limit.
const fn default_max_output_bytes() -> usize {
    16 * 1024
}

impl ProcessExecutorConfig {
    /// Creates a config with default exit-code mapping.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            failure_codes: default_failure_codes(),
            fatal_codes: Vec::new(),
            max_output_bytes: default_max_output_bytes(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }
}

// ============================================================================
// SECTION: Executor Implementation
// ============================================================================

/// Test executor backed by one process per leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessExecutor {
    /// Executor configuration.
    config: ProcessExecutorConfig,
}

impl ProcessExecutor {
    /// Creates a new process executor.
    #[must_use]
    pub const fn new(config: ProcessExecutorConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the executor configuration.
    #[must_use]
    pub const fn config(&self) -> &ProcessExecutorConfig {
        &self.config
    }

    /// Builds the command for a leaf.
    fn command(&self, leaf_id: &LeafId) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(self.config.args.iter().map(|arg| arg.replace(LEAF_PLACEHOLDER, leaf_id.as_str())))
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        command
    }

    /// Builds the outcome detail from captured output.
    fn detail(&self, output: &BoundedOutput, status: &str) -> String {
        let mut combined = output.stdout.clone();
        combined.extend_from_slice(&output.stderr);
        let captured = lossy_truncated(&combined, self.config.max_output_bytes);
        let captured = captured.trim();
        if captured.is_empty() { status.to_string() } else { format!("{status}: {captured}") }
    }
}

impl TestExecutor for ProcessExecutor {
    fn execute(&self, leaf_id: &LeafId) -> Result<ExecutionOutcome, FatalExecutorError> {
        let output = run_bounded(&mut self.command(leaf_id), self.config.max_output_bytes)
            .map_err(|err| {
                FatalExecutorError::new(format!("failed to spawn {}: {err}", self.config.program))
            })?;
        let Some(code) = output.status.code() else {
            return Ok(ExecutionOutcome::Errored(self.detail(&output, "terminated by signal")));
        };
        let status = format!("exit status {code}");
        if code == 0 {
            Ok(ExecutionOutcome::Passed)
        } else if self.config.fatal_codes.contains(&code) {
            Err(FatalExecutorError::new(self.detail(&output, &status)))
        } else if self.config.failure_codes.contains(&code) {
            Ok(ExecutionOutcome::Failed(self.detail(&output, &status)))
        } else {
            Ok(ExecutionOutcome::Errored(self.detail(&output, &status)))
        }
    }
}
