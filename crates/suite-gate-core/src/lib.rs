// crates/suite-gate-core/src/lib.rs
// ============================================================================
// Module: Suite Gate Core Library
// Description: Public API surface for the Suite Gate core.
// Purpose: Expose suite types, collaborator interfaces, and runtime engine.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Suite Gate core resolves nested integration-test suites into a
//! deterministic, de-duplicated execution plan, gates subtrees on environment
//! capabilities, and drives the resulting plan through an external test
//! executor. It is runner-agnostic and integrates through explicit interfaces
//! rather than embedding into a particular test framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EnvironmentProbe;
pub use interfaces::ExecutionOutcome;
pub use interfaces::FatalExecutorError;
pub use interfaces::ProbeAnswer;
pub use interfaces::ProbeError;
pub use interfaces::Reporter;
pub use interfaces::TestExecutor;
pub use runtime::ExecutionCoordinator;
pub use runtime::GateDecision;
pub use runtime::GateError;
pub use runtime::GateSession;
pub use runtime::JsonLinesReporter;
pub use runtime::NoopReporter;
pub use runtime::PlanError;
pub use runtime::PreconditionError;
pub use runtime::PreconditionGate;
pub use runtime::RecordedEvent;
pub use runtime::RecordingReporter;
pub use runtime::RegistryError;
pub use runtime::ResolveError;
pub use runtime::ResolvedLeaf;
pub use runtime::SuitePlanner;
pub use runtime::SuiteRegistry;
pub use runtime::SuiteResolver;
