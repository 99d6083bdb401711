// crates/suite-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Suite Gate Runtime
// Description: Resolution, gating, planning, and execution engine.
// Purpose: Turn registered suites into plans and drive them to reports.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime is layered bottom-up: the registry stores definitions, the
//! resolver expands them, the gate decides preconditions, the planner joins
//! the two into a [`crate::core::ResolvedPlan`], and the coordinator executes
//! plans sequentially. Only the coordinator has side effects.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod coordinator;
pub mod gate;
pub mod planner;
pub mod registry;
pub mod reporting;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use coordinator::ExecutionCoordinator;
pub use gate::GateDecision;
pub use gate::GateError;
pub use gate::GateSession;
pub use gate::PreconditionError;
pub use gate::PreconditionGate;
pub use planner::PlanError;
pub use planner::SuitePlanner;
pub use registry::RegistryError;
pub use registry::SuiteRegistry;
pub use reporting::JsonLinesReporter;
pub use reporting::NoopReporter;
pub use reporting::RecordedEvent;
pub use reporting::RecordingReporter;
pub use resolver::ResolveError;
pub use resolver::ResolvedLeaf;
pub use resolver::SuiteResolver;
