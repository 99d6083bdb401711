// crates/suite-gate-core/src/core/mod.rs
// ============================================================================
// Module: Suite Gate Core Types
// Description: Canonical suite, plan, and report structures.
// Purpose: Provide stable, serializable types shared by every Suite Gate surface.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Core types define suite definitions, preconditions, resolved plans, and run
//! reports. These types are the canonical source of truth for configuration
//! files, CLI output, and reporter events.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod plan;
pub mod report;
pub mod suite;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::CapabilityName;
pub use identifiers::LeafId;
pub use identifiers::SuiteName;
pub use plan::EntryGate;
pub use plan::FingerprintError;
pub use plan::PlanEntry;
pub use plan::PlanFingerprint;
pub use plan::ProbeRecord;
pub use plan::ProbeStatus;
pub use plan::ResolvedPlan;
pub use report::LeafOutcome;
pub use report::LeafRecord;
pub use report::RunReport;
pub use report::RunStatus;
pub use report::RunSummary;
pub use suite::Member;
pub use suite::Precondition;
pub use suite::SuiteDefinition;
