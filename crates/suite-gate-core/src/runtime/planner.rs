// crates/suite-gate-core/src/runtime/planner.rs
// ============================================================================
// Module: Suite Gate Planner
// Description: Combines resolution and precondition gating into plans.
// Purpose: Produce a fresh ResolvedPlan for each invocation.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Planning is the last step before execution. All structural faults
//! (missing suites, cycles, preconditions bound to unknown suites) surface
//! here, so no leaf is ever executed against an invalid plan. Probe failures
//! are not structural: they are folded into the affected entries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::PlanEntry;
use crate::core::ResolvedPlan;
use crate::core::SuiteName;
use crate::interfaces::EnvironmentProbe;
use crate::runtime::gate::PreconditionGate;
use crate::runtime::registry::SuiteRegistry;
use crate::runtime::resolver::ResolveError;
use crate::runtime::resolver::SuiteResolver;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural errors that prevent a plan from being produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Suite graph resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A precondition is bound to a suite that is not registered.
    #[error("precondition bound to unknown suite: {0}")]
    UnknownGatedSuite(SuiteName),
}

// ============================================================================
// SECTION: Planner
// ============================================================================

/// Builds resolved, gated plans from a registry and gate.
#[derive(Debug, Clone, Copy)]
pub struct SuitePlanner<'a> {
    /// Registry providing suite definitions.
    registry: &'a SuiteRegistry,
    /// Gate providing precondition bindings.
    gate: &'a PreconditionGate,
}

impl<'a> SuitePlanner<'a> {
    /// Creates a planner.
    #[must_use]
    pub const fn new(registry: &'a SuiteRegistry, gate: &'a PreconditionGate) -> Self {
        Self {
            registry,
            gate,
        }
    }

    /// Verifies that every gated suite is registered.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownGatedSuite`] for the first unknown binding.
    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(unknown) = self.gate.bound_suites().find(|name| !self.registry.contains(name)) {
            return Err(PlanError::UnknownGatedSuite(unknown.clone()));
        }
        Ok(())
    }

    /// Resolves and gates a suite into an execution plan.
    ///
    /// Each call opens a new gate session, so capability probes are cached
    /// for this plan only.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when the suite graph is invalid.
    pub fn plan<P: EnvironmentProbe>(
        &self,
        suite: &SuiteName,
        probe: P,
    ) -> Result<ResolvedPlan, PlanError> {
        self.validate()?;
        let leaves = SuiteResolver::new(self.registry).resolve_with_origins(suite)?;
        let mut session = self.gate.session(probe);
        let entries = leaves
            .into_iter()
            .map(|leaf| PlanEntry {
                gate: session.evaluate_path(&leaf.suite_path),
                leaf_id: leaf.leaf_id,
                suite_path: leaf.suite_path,
            })
            .collect();
        Ok(ResolvedPlan {
            suite: suite.clone(),
            entries,
            probes: session.into_observations(),
        })
    }
}
