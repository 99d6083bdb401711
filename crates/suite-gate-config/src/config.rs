// crates/suite-gate-config/src/config.rs
// ============================================================================
// Module: Suite Gate Configuration
// Description: Configuration loading and validation for Suite Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: suite-gate-core, suite-gate-providers, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! A file declares suites (`[[suites]]`), how capabilities are probed
//! (`[probe]`), how leaves are executed (`[executor]`), and where run events
//! go (`[report]`). Validation checks shape only; suite graph structure
//! (missing references, cycles) is checked by the resolver.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use suite_gate_core::CapabilityName;
use suite_gate_core::Member;
use suite_gate_core::Precondition;
use suite_gate_core::PreconditionGate;
use suite_gate_core::SuiteDefinition;
use suite_gate_core::SuiteName;
use suite_gate_core::SuiteRegistry;
use suite_gate_providers::CommandProbe;
use suite_gate_providers::CommandProbeConfig;
use suite_gate_providers::EnvProbe;
use suite_gate_providers::EnvProbeConfig;
use suite_gate_providers::ProbeRegistry;
use suite_gate_providers::ProbeRegistryError;
use suite_gate_providers::ProcessExecutor;
use suite_gate_providers::ProcessExecutorConfig;
use suite_gate_providers::StaticProbe;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "suite-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "SUITE_GATE_CONFIG";
/// Maximum size of a config file in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of suites in one file.
pub(crate) const MAX_SUITES: usize = 4096;
/// Maximum number of members in one suite.
pub(crate) const MAX_SUITE_MEMBERS: usize = 4096;
/// Maximum length of suite, leaf, and capability names.
pub(crate) const MAX_NAME_LENGTH: usize = 256;
/// Upper bound for executor output capture.
pub(crate) const MAX_OUTPUT_CAPTURE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Suite Gate configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteGateConfig {
    /// Suite definitions in declaration order.
    #[serde(default)]
    pub suites: Vec<SuiteConfig>,
    /// Capability probe configuration.
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Optional leaf executor configuration.
    #[serde(default)]
    pub executor: Option<ProcessExecutorConfig>,
    /// Run event reporting configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl SuiteGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suites.len() > MAX_SUITES {
            return Err(ConfigError::Invalid(format!("too many suites (max {MAX_SUITES})")));
        }
        let mut names = BTreeSet::new();
        for suite in &self.suites {
            suite.validate()?;
            if !names.insert(&suite.name) {
                return Err(ConfigError::Invalid(format!("duplicate suite name: {}", suite.name)));
            }
        }
        self.probe.validate()?;
        if let Some(executor) = &self.executor {
            validate_executor(executor)?;
        }
        self.report.validate()?;
        Ok(())
    }

    /// Builds the suite registry from declared suites.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a suite name is registered twice.
    pub fn suite_registry(&self) -> Result<SuiteRegistry, ConfigError> {
        let mut registry = SuiteRegistry::new();
        for suite in &self.suites {
            registry
                .register_definition(SuiteDefinition::new(suite.name.clone(), suite.members.clone()))
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(registry)
    }

    /// Builds the precondition gate from suite preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a suite is bound twice.
    pub fn precondition_gate(&self) -> Result<PreconditionGate, ConfigError> {
        let mut gate = PreconditionGate::new();
        for suite in &self.suites {
            if let Some(precondition) = &suite.precondition {
                gate.bind(suite.name.clone(), precondition.clone())
                    .map_err(|err| ConfigError::Invalid(err.to_string()))?;
            }
        }
        Ok(gate)
    }

    /// Builds the probe registry from probe configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when routes name unconfigured probes.
    pub fn probe_registry(&self) -> Result<ProbeRegistry, ConfigError> {
        self.probe.build()
    }

    /// Builds the process executor, if one is configured.
    #[must_use]
    pub fn process_executor(&self) -> Option<ProcessExecutor> {
        self.executor.clone().map(ProcessExecutor::new)
    }
}

// ============================================================================
// SECTION: Suites
// ============================================================================

/// One `[[suites]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Unique suite name.
    pub name: SuiteName,
    /// Ordered members: `{ test = "..." }` or `{ suite = "..." }`.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Optional capability precondition for the whole suite.
    #[serde(default)]
    pub precondition: Option<Precondition>,
}

impl SuiteConfig {
    /// Validates a single suite entry.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("suite name", self.name.as_str())?;
        if self.members.len() > MAX_SUITE_MEMBERS {
            return Err(ConfigError::Invalid(format!(
                "suite {} has too many members (max {MAX_SUITE_MEMBERS})",
                self.name
            )));
        }
        for member in &self.members {
            match member {
                Member::Test(leaf_id) => validate_name("leaf id", leaf_id.as_str())?,
                Member::Suite(name) => validate_name("suite reference", name.as_str())?,
            }
        }
        if let Some(precondition) = &self.precondition {
            validate_name("precondition capability", precondition.capability.as_str())?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Probes
// ============================================================================

/// Built-in probe kinds addressable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Answers from `[probe.static]`.
    Static,
    /// Reads `<prefix><CAPABILITY>` environment flags.
    #[default]
    Env,
    /// Runs `[probe.command]`.
    Command,
}

impl ProbeKind {
    /// Returns the probe identifier used in the probe registry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Env => "env",
            Self::Command => "command",
        }
    }
}

/// `[probe]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Probe used for capabilities without an explicit route.
    #[serde(default)]
    pub default: ProbeKind,
    /// Declared capability support for the static probe.
    #[serde(default, rename = "static")]
    pub static_answers: BTreeMap<String, bool>,
    /// Environment probe settings.
    #[serde(default)]
    pub env: EnvProbeConfig,
    /// Optional command probe settings.
    #[serde(default)]
    pub command: Option<CommandProbeConfig>,
    /// Per-capability probe routes.
    #[serde(default)]
    pub routes: BTreeMap<String, ProbeKind>,
}

impl ProbeConfig {
    /// Validates probe settings.
    fn validate(&self) -> Result<(), ConfigError> {
        for capability in self.static_answers.keys().chain(self.routes.keys()) {
            validate_name("probe capability", capability)?;
        }
        if self.env.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("probe.env.prefix must be set".to_string()));
        }
        if self.env.max_value_bytes == 0 {
            return Err(ConfigError::Invalid(
                "probe.env.max_value_bytes must be greater than zero".to_string(),
            ));
        }
        if let Some(command) = &self.command
            && command.program.trim().is_empty()
        {
            return Err(ConfigError::Invalid("probe.command.program must be set".to_string()));
        }
        let uses_command = self.default == ProbeKind::Command
            || self.routes.values().any(|kind| *kind == ProbeKind::Command);
        if uses_command && self.command.is_none() {
            return Err(ConfigError::Invalid(
                "command probe is routed but probe.command is not configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds a probe registry with every configured probe registered.
    fn build(&self) -> Result<ProbeRegistry, ConfigError> {
        let invalid = |err: ProbeRegistryError| ConfigError::Invalid(err.to_string());
        let answers = self
            .static_answers
            .iter()
            .map(|(capability, supported)| (CapabilityName::new(capability.as_str()), *supported))
            .collect();
        let mut registry = ProbeRegistry::new();
        registry
            .register_probe(ProbeKind::Static.as_str(), StaticProbe::new(answers))
            .map_err(invalid)?;
        registry
            .register_probe(ProbeKind::Env.as_str(), EnvProbe::new(self.env.clone()))
            .map_err(invalid)?;
        if let Some(command) = &self.command {
            registry
                .register_probe(ProbeKind::Command.as_str(), CommandProbe::new(command.clone()))
                .map_err(invalid)?;
        }
        registry.set_default(self.default.as_str()).map_err(invalid)?;
        for (capability, kind) in &self.routes {
            registry.route(capability.as_str(), kind.as_str()).map_err(invalid)?;
        }
        Ok(registry)
    }
}

// ============================================================================
// SECTION: Executor
// ============================================================================

/// Validates executor settings.
fn validate_executor(config: &ProcessExecutorConfig) -> Result<(), ConfigError> {
    if config.program.trim().is_empty() {
        return Err(ConfigError::Invalid("executor.program must be set".to_string()));
    }
    if config.failure_codes.contains(&0) || config.fatal_codes.contains(&0) {
        return Err(ConfigError::Invalid("exit code 0 is reserved for passing leaves".to_string()));
    }
    if let Some(code) = config.failure_codes.iter().find(|code| config.fatal_codes.contains(code)) {
        return Err(ConfigError::Invalid(format!(
            "exit code {code} is both a failure and a fatal code"
        )));
    }
    if config.max_output_bytes == 0 || config.max_output_bytes > MAX_OUTPUT_CAPTURE_BYTES {
        return Err(ConfigError::Invalid(format!(
            "executor.max_output_bytes must be between 1 and {MAX_OUTPUT_CAPTURE_BYTES}"
        )));
    }
    if let Some(dir) = &config.working_dir {
        validate_path(dir)?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Destination for run events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSink {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `report.path`.
    File,
    /// Discard run events.
    None,
}

/// `[report]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Event destination.
    #[serde(default)]
    pub sink: ReportSink,
    /// File path for the `file` sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ReportConfig {
    /// Validates report settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (ReportSink::File, None) => {
                Err(ConfigError::Invalid("report.path is required for the file sink".to_string()))
            }
            (ReportSink::File, Some(path)) => validate_path(path),
            (ReportSink::Stderr | ReportSink::None, _) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a suite, leaf, or capability name.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_NAME_LENGTH} bytes")));
    }
    Ok(())
}
