// crates/suite-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Suite Gate Interfaces
// Description: Runner-agnostic interfaces for execution, probing, and reporting.
// Purpose: Define the contract surfaces consumed by the Suite Gate runtime.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Suite Gate integrates with external systems without
//! embedding runner-specific details. Test bodies, capability queries, and
//! result presentation all live behind these traits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::CapabilityName;
use crate::core::LeafId;
use crate::core::LeafOutcome;
use crate::core::ProbeRecord;
use crate::core::RunReport;

// ============================================================================
// SECTION: Test Executor
// ============================================================================

/// Result of executing a single leaf test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Assertions held.
    Passed,
    /// An assertion was violated.
    Failed(String),
    /// An infrastructure or setup fault prevented completion.
    Errored(String),
}

impl From<ExecutionOutcome> for LeafOutcome {
    fn from(value: ExecutionOutcome) -> Self {
        match value {
            ExecutionOutcome::Passed => Self::Passed,
            ExecutionOutcome::Failed(detail) => Self::Failed {
                detail,
            },
            ExecutionOutcome::Errored(detail) => Self::Errored {
                detail,
            },
        }
    }
}

/// Non-recoverable executor condition that aborts the remainder of a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fatal executor condition: {detail}")]
pub struct FatalExecutorError {
    /// Condition detail (for example, loss of connectivity).
    pub detail: String,
}

impl FatalExecutorError {
    /// Creates a new fatal executor error.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// External executor that runs leaf tests.
pub trait TestExecutor {
    /// Executes one leaf test and reports its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`FatalExecutorError`] when the target environment can no longer
    /// be used for any further leaf.
    fn execute(&self, leaf_id: &LeafId) -> Result<ExecutionOutcome, FatalExecutorError>;
}

impl<E: TestExecutor + ?Sized> TestExecutor for &E {
    fn execute(&self, leaf_id: &LeafId) -> Result<ExecutionOutcome, FatalExecutorError> {
        (**self).execute(leaf_id)
    }
}

impl<E: TestExecutor + ?Sized> TestExecutor for Box<E> {
    fn execute(&self, leaf_id: &LeafId) -> Result<ExecutionOutcome, FatalExecutorError> {
        (**self).execute(leaf_id)
    }
}

// ============================================================================
// SECTION: Environment Probe
// ============================================================================

/// Successful answer from a capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeAnswer {
    /// The capability is available.
    Supported,
    /// The capability is not available.
    Unsupported,
}

/// Probe failure: the capability query itself could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// No probe is able to answer for the capability.
    #[error("no probe configured for capability: {0}")]
    Unroutable(CapabilityName),
    /// The probe ran but failed to produce an answer.
    #[error("capability probe failed: {0}")]
    Failed(String),
}

/// Capability query mechanism consulted by preconditions.
pub trait EnvironmentProbe {
    /// Queries whether the environment supports a capability.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the query cannot be answered.
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError>;
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for &P {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        (**self).query(capability)
    }
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for Box<P> {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        (**self).query(capability)
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Observational sink for run events.
///
/// Reporters never feed back into the coordinator; write failures are the
/// reporter's own concern.
pub trait Reporter {
    /// Records a capability probe observation made while gating.
    fn record_probe(&self, _record: &ProbeRecord) {}

    /// Records the outcome of one leaf, in execution order.
    fn record_leaf(&self, leaf_id: &LeafId, outcome: &LeafOutcome);

    /// Records the final run report.
    fn record_report(&self, report: &RunReport);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn record_probe(&self, record: &ProbeRecord) {
        (**self).record_probe(record);
    }

    fn record_leaf(&self, leaf_id: &LeafId, outcome: &LeafOutcome) {
        (**self).record_leaf(leaf_id, outcome);
    }

    fn record_report(&self, report: &RunReport) {
        (**self).record_report(report);
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn record_probe(&self, record: &ProbeRecord) {
        (**self).record_probe(record);
    }

    fn record_leaf(&self, leaf_id: &LeafId, outcome: &LeafOutcome) {
        (**self).record_leaf(leaf_id, outcome);
    }

    fn record_report(&self, report: &RunReport) {
        (**self).record_report(report);
    }
}
