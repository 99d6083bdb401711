// crates/suite-gate-providers/src/command.rs
// ============================================================================
// Module: Command Capability Probe
// Description: Capability probe that runs an external command.
// Purpose: Query remote or expensive capabilities through existing tooling.
// Dependencies: suite-gate-core, serde
// ============================================================================

//! ## Overview
//! The command probe runs `program args...` with every `{capability}`
//! placeholder in `args` replaced by the capability name. Exit status 0 means
//! supported and 1 means unsupported; any other status, termination by
//! signal, or spawn failure means the probe could not answer. Stderr is read
//! through a bound of `max_detail_bytes`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use serde::Deserialize;
use suite_gate_core::CapabilityName;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;

use crate::capture::lossy_truncated;
use crate::capture::run_bounded;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Placeholder replaced by the capability name in probe arguments.
pub const CAPABILITY_PLACEHOLDER: &str = "{capability}";

/// Configuration for the command probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandProbeConfig {
    /// Program to execute.
    pub program: String,
    /// Arguments; `{capability}` is substituted.
    #[serde(default)]
    pub args: Vec<String>,
    /// Optional working directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// Maximum stderr bytes kept in failure details.
    #[serde(default = "default_max_detail_bytes")]
    pub max_detail_bytes: usize,
}

/// Default stderr capture limit for probe failures.
const fn default_max_detail_bytes() -> usize {
    4 * 1024
}

impl CommandProbeConfig {
    /// Creates a config for a program with arguments.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            max_detail_bytes: default_max_detail_bytes(),
        }
    }
}

// ============================================================================
// SECTION: Probe Implementation
// ============================================================================

/// Capability probe backed by an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProbe {
    /// Probe configuration.
    config: CommandProbeConfig,
}

impl CommandProbe {
    /// Creates a new command probe.
    #[must_use]
    pub const fn new(config: CommandProbeConfig) -> Self {
        Self {
            config,
        }
    }

    /// Builds the command for a capability.
    fn command(&self, capability: &CapabilityName) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(
                self.config
                    .args
                    .iter()
                    .map(|arg| arg.replace(CAPABILITY_PLACEHOLDER, capability.as_str())),
            )
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl EnvironmentProbe for CommandProbe {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        let output = run_bounded(&mut self.command(capability), self.config.max_detail_bytes)
            .map_err(|err| {
                ProbeError::Failed(format!("failed to spawn {}: {err}", self.config.program))
            })?;
        match output.status.code() {
            Some(0) => Ok(ProbeAnswer::Supported),
            Some(1) => Ok(ProbeAnswer::Unsupported),
            code => {
                let status = code.map_or_else(
                    || "terminated by signal".to_string(),
                    |code| format!("exit status {code}"),
                );
                let stderr = lossy_truncated(&output.stderr, self.config.max_detail_bytes);
                let detail = if stderr.trim().is_empty() {
                    format!("{} {status}", self.config.program)
                } else {
                    format!("{} {status}: {}", self.config.program, stderr.trim())
                };
                Err(ProbeError::Failed(detail))
            }
        }
    }
}
