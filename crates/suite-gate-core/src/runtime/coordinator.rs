// crates/suite-gate-core/src/runtime/coordinator.rs
// ============================================================================
// Module: Suite Gate Execution Coordinator
// Description: Sequential execution of resolved plans.
// Purpose: Drive runnable leaves through the executor and collect outcomes.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The coordinator is the only component with side effects. It visits plan
//! entries strictly in order on the calling thread, because leaves share and
//! mutate external environment state and cannot interleave.
//!
//! Invariants:
//! - Gated entries never reach the executor.
//! - Per-leaf failures and errors are recorded and the run continues.
//! - A fatal executor condition aborts the remainder; unvisited entries are
//!   recorded as not run, so every plan entry yields exactly one record.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::EntryGate;
use crate::core::LeafOutcome;
use crate::core::LeafRecord;
use crate::core::ResolvedPlan;
use crate::core::RunReport;
use crate::core::RunStatus;
use crate::core::RunSummary;
use crate::interfaces::Reporter;
use crate::interfaces::TestExecutor;

// ============================================================================
// SECTION: Coordinator
// ============================================================================

/// Drives resolved plans through a test executor.
pub struct ExecutionCoordinator<E, R> {
    /// External test executor.
    executor: E,
    /// Observational reporter.
    reporter: R,
}

impl<E, R> ExecutionCoordinator<E, R>
where
    E: TestExecutor,
    R: Reporter,
{
    /// Creates a coordinator.
    #[must_use]
    pub const fn new(executor: E, reporter: R) -> Self {
        Self {
            executor,
            reporter,
        }
    }

    /// Runs a plan to completion or fatal abort and returns the report.
    #[must_use]
    pub fn run(&self, plan: &ResolvedPlan) -> RunReport {
        for probe in &plan.probes {
            self.reporter.record_probe(probe);
        }

        let mut records = Vec::with_capacity(plan.entries.len());
        let mut status = RunStatus::Completed;

        for entry in &plan.entries {
            let outcome = if matches!(status, RunStatus::Aborted { .. }) {
                LeafOutcome::NotRun
            } else {
                match &entry.gate {
                    EntryGate::Skipped {
                        reason, ..
                    } => LeafOutcome::Skipped {
                        reason: reason.clone(),
                    },
                    EntryGate::Blocked {
                        capability,
                        detail,
                        ..
                    } => LeafOutcome::PreconditionError {
                        capability: capability.clone(),
                        detail: detail.clone(),
                    },
                    EntryGate::Runnable => match self.executor.execute(&entry.leaf_id) {
                        Ok(outcome) => outcome.into(),
                        Err(fatal) => {
                            status = RunStatus::Aborted {
                                leaf_id: entry.leaf_id.clone(),
                                detail: fatal.detail.clone(),
                            };
                            LeafOutcome::Errored {
                                detail: fatal.detail,
                            }
                        }
                    },
                }
            };
            self.reporter.record_leaf(&entry.leaf_id, &outcome);
            records.push(LeafRecord {
                leaf_id: entry.leaf_id.clone(),
                outcome,
            });
        }

        let report = RunReport {
            suite: plan.suite.clone(),
            status,
            plan_hash: plan.fingerprint().ok(),
            summary: RunSummary::from_records(&records),
            records,
        };
        self.reporter.record_report(&report);
        report
    }
}
