// crates/suite-gate-providers/src/lib.rs
// ============================================================================
// Module: Suite Gate Providers
// Description: Built-in capability probes, probe routing, and process executor.
// Purpose: Provide zero-code integrations for the Suite Gate core interfaces.
// Dependencies: suite-gate-core, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate ships built-in [`suite_gate_core::EnvironmentProbe`]
//! implementations (static, env, command), a [`ProbeRegistry`] that routes
//! capability queries to named probes, and a [`ProcessExecutor`] that runs
//! each leaf test as an external command.
//! Invariants:
//! - Capability queries are routed via [`ProbeRegistry`] by capability name.
//! - Probes distinguish "unsupported" answers from failures to answer.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod capture;
pub mod command;
pub mod env;
pub mod process;
pub mod registry;
pub mod static_probe;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use command::CommandProbe;
pub use command::CommandProbeConfig;
pub use env::EnvProbe;
pub use env::EnvProbeConfig;
pub use process::ProcessExecutor;
pub use process::ProcessExecutorConfig;
pub use registry::ProbeRegistry;
pub use registry::ProbeRegistryError;
pub use static_probe::StaticProbe;
