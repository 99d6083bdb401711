// crates/suite-gate-providers/src/env.rs
// ============================================================================
// Module: Environment Capability Probe
// Description: Capability probe reading flags from environment variables.
// Purpose: Let CI environments declare capabilities through process state.
// Dependencies: suite-gate-core, serde
// ============================================================================

//! ## Overview
//! The env probe maps a capability to the variable `<PREFIX><CAPABILITY>`
//! (capability upper-cased, non-alphanumerics replaced by `_`) and parses
//! the value as a boolean flag. A missing variable means unsupported; a value
//! that is not a recognised flag, or is not valid Unicode, is a probe failure
//! rather than a guess.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env::VarError;

use serde::Deserialize;
use suite_gate_core::CapabilityName;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default variable prefix for capability flags.
pub const DEFAULT_ENV_PREFIX: &str = "SUITE_GATE_CAP_";

/// Configuration for the environment probe.
///
/// # Invariants
/// - `overrides` take precedence over process environment reads.
/// - `max_value_bytes` is enforced as a hard upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvProbeConfig {
    /// Prefix prepended to the normalized capability name.
    pub prefix: String,
    /// Optional override map keyed by full variable name.
    pub overrides: Option<BTreeMap<String, String>>,
    /// Maximum bytes allowed for a flag value.
    pub max_value_bytes: usize,
}

impl Default for EnvProbeConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ENV_PREFIX.to_string(),
            overrides: None,
            max_value_bytes: 64,
        }
    }
}

// ============================================================================
// SECTION: Probe Implementation
// ============================================================================

/// Capability probe backed by environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProbe {
    /// Probe configuration.
    config: EnvProbeConfig,
}

impl EnvProbe {
    /// Creates a new environment probe.
    #[must_use]
    pub const fn new(config: EnvProbeConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns the variable name consulted for a capability.
    #[must_use]
    pub fn variable_name(&self, capability: &CapabilityName) -> String {
        let mut name = self.config.prefix.clone();
        name.extend(capability.as_str().chars().map(|ch| {
            if ch.is_ascii_alphanumeric() { ch.to_ascii_uppercase() } else { '_' }
        }));
        name
    }

    /// Reads the raw flag value from overrides or the process environment.
    fn read(&self, key: &str) -> Result<Option<String>, ProbeError> {
        if let Some(overrides) = &self.config.overrides {
            return Ok(overrides.get(key).cloned());
        }
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => {
                Err(ProbeError::Failed(format!("{key} is not valid unicode")))
            }
        }
    }
}

impl EnvironmentProbe for EnvProbe {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        let key = self.variable_name(capability);
        let Some(value) = self.read(&key)? else {
            return Ok(ProbeAnswer::Unsupported);
        };
        if value.len() > self.config.max_value_bytes {
            return Err(ProbeError::Failed(format!("{key} value exceeds limit")));
        }
        parse_flag(&value)
            .ok_or_else(|| ProbeError::Failed(format!("{key} is not a boolean flag: '{value}'")))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a boolean capability flag.
pub(crate) fn parse_flag(value: &str) -> Option<ProbeAnswer> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(ProbeAnswer::Supported),
        "false" | "0" | "no" | "off" => Some(ProbeAnswer::Unsupported),
        _ => None,
    }
}
