// crates/suite-gate-core/src/core/report.rs
// ============================================================================
// Module: Suite Gate Run Reports
// Description: Per-leaf outcomes, aggregate counts, and final run reports.
// Purpose: Capture every run result as data so execution never throws past the coordinator.
// Dependencies: crate::core::{identifiers, plan}, serde
// ============================================================================

//! ## Overview
//! Every plan entry produces exactly one [`LeafRecord`]. Counts in
//! [`RunSummary`] are derived from those records, so the summary and the
//! ordered outcome list can never disagree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CapabilityName;
use crate::core::identifiers::LeafId;
use crate::core::identifiers::SuiteName;
use crate::core::plan::PlanFingerprint;

// ============================================================================
// SECTION: Leaf Outcomes
// ============================================================================

/// Final outcome recorded for a single plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeafOutcome {
    /// Leaf executed and its assertions held.
    Passed,
    /// Leaf executed and an assertion was violated.
    Failed {
        /// Failure detail reported by the executor.
        detail: String,
    },
    /// Leaf could not complete because of an infrastructure or setup fault.
    Errored {
        /// Error detail reported by the executor.
        detail: String,
    },
    /// Leaf was not executed because an enclosing capability is unsupported.
    Skipped {
        /// Human-readable skip reason.
        reason: String,
    },
    /// Leaf was not executed because an enclosing capability probe failed.
    PreconditionError {
        /// Capability whose probe failed.
        capability: CapabilityName,
        /// Probe failure detail.
        detail: String,
    },
    /// Leaf was not executed because the run aborted before reaching it.
    NotRun,
}

impl LeafOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed { .. } => "failed",
            Self::Errored { .. } => "errored",
            Self::Skipped { .. } => "skipped",
            Self::PreconditionError { .. } => "precondition_error",
            Self::NotRun => "not_run",
        }
    }
}

/// Outcome for one leaf, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafRecord {
    /// Leaf test identifier.
    pub leaf_id: LeafId,
    /// Recorded outcome.
    pub outcome: LeafOutcome,
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Aggregate counts for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Leaves that passed.
    pub passed: usize,
    /// Leaves that failed an assertion.
    pub failed: usize,
    /// Leaves that errored.
    pub errored: usize,
    /// Leaves skipped by an unsupported capability.
    pub skipped: usize,
    /// Leaves blocked by a failed capability probe.
    pub precondition_errors: usize,
    /// Leaves never reached because the run aborted.
    pub not_run: usize,
}

impl RunSummary {
    /// Builds a summary from ordered leaf records.
    #[must_use]
    pub fn from_records(records: &[LeafRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.count(&record.outcome);
        }
        summary
    }

    /// Increments the counter matching an outcome.
    pub const fn count(&mut self, outcome: &LeafOutcome) {
        match outcome {
            LeafOutcome::Passed => self.passed += 1,
            LeafOutcome::Failed { .. } => self.failed += 1,
            LeafOutcome::Errored { .. } => self.errored += 1,
            LeafOutcome::Skipped { .. } => self.skipped += 1,
            LeafOutcome::PreconditionError { .. } => self.precondition_errors += 1,
            LeafOutcome::NotRun => self.not_run += 1,
        }
    }

    /// Returns the total number of recorded leaves.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed
            + self.failed
            + self.errored
            + self.skipped
            + self.precondition_errors
            + self.not_run
    }
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every plan entry was visited.
    Completed,
    /// The executor signalled a fatal condition and the remainder was not run.
    Aborted {
        /// Leaf during which the fatal condition was raised.
        leaf_id: LeafId,
        /// Fatal condition detail.
        detail: String,
    },
}

/// Final report produced by the execution coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Suite the run was planned from.
    pub suite: SuiteName,
    /// Terminal status.
    pub status: RunStatus,
    /// Canonical hash of the executed plan, when computable.
    pub plan_hash: Option<PlanFingerprint>,
    /// Aggregate counts.
    pub summary: RunSummary,
    /// Per-leaf outcomes in execution order.
    pub records: Vec<LeafRecord>,
}

impl RunReport {
    /// Returns true when the run completed without failures, errors, or blocked leaves.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, RunStatus::Completed)
            && self.summary.failed == 0
            && self.summary.errored == 0
            && self.summary.precondition_errors == 0
            && self.summary.not_run == 0
    }

    /// Returns true when the run was aborted by a fatal executor condition.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self.status, RunStatus::Aborted { .. })
    }
}
