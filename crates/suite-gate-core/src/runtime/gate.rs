// crates/suite-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Suite Gate Precondition Gate
// Description: Capability preconditions bound to suites and their evaluation.
// Purpose: Decide once per run whether a suite subtree may run.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! A [`PreconditionGate`] binds at most one [`Precondition`] to each suite
//! name and is immutable during runs. Evaluation happens inside a
//! [`GateSession`], which owns the per-run capability cache: each capability
//! is probed at most once per session, and both answers and probe failures
//! are cached so the run's view of the environment never changes once
//! observed.
//!
//! Gating works on suite boundaries. For a leaf reached through a chain of
//! suites, the chain is walked outermost-first and the first skip or probe
//! failure decides; suites nested beneath that point are never probed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::CapabilityName;
use crate::core::EntryGate;
use crate::core::Precondition;
use crate::core::ProbeRecord;
use crate::core::ProbeStatus;
use crate::core::SuiteName;
use crate::interfaces::EnvironmentProbe;
use crate::interfaces::ProbeAnswer;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while binding preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The suite already has a precondition bound.
    #[error("precondition already bound for suite: {0}")]
    AlreadyBound(SuiteName),
}

/// A capability probe could not answer for a gated suite.
///
/// Fatal for the suite's subtree only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("precondition for suite {suite} could not be evaluated ({capability}): {detail}")]
pub struct PreconditionError {
    /// Gated suite.
    pub suite: SuiteName,
    /// Capability whose probe failed.
    pub capability: CapabilityName,
    /// Probe failure detail.
    pub detail: String,
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Gating decision for a single suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The suite has no precondition, or its capability is supported.
    Runnable,
    /// The suite's capability is unsupported.
    Skipped {
        /// Capability reported unsupported.
        capability: CapabilityName,
        /// Human-readable skip reason.
        reason: String,
    },
}

// ============================================================================
// SECTION: Precondition Gate
// ============================================================================

/// Precondition bindings keyed by suite name.
#[derive(Debug, Clone, Default)]
pub struct PreconditionGate {
    /// Bound preconditions.
    bindings: BTreeMap<SuiteName, Precondition>,
}

impl PreconditionGate {
    /// Creates a gate with no bindings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Binds a precondition to a suite.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::AlreadyBound`] when the suite already has one.
    pub fn bind(
        &mut self,
        suite: impl Into<SuiteName>,
        precondition: Precondition,
    ) -> Result<(), GateError> {
        let suite = suite.into();
        if self.bindings.contains_key(&suite) {
            return Err(GateError::AlreadyBound(suite));
        }
        self.bindings.insert(suite, precondition);
        Ok(())
    }

    /// Returns the precondition bound to a suite, if any.
    #[must_use]
    pub fn precondition(&self, suite: &SuiteName) -> Option<&Precondition> {
        self.bindings.get(suite)
    }

    /// Returns gated suite names in lexical order.
    pub fn bound_suites(&self) -> impl Iterator<Item = &SuiteName> + Clone {
        self.bindings.keys()
    }

    /// Returns true when no preconditions are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Opens a per-run evaluation session against a probe.
    #[must_use]
    pub fn session<P: EnvironmentProbe>(&self, probe: P) -> GateSession<'_, P> {
        GateSession {
            gate: self,
            probe,
            cache: BTreeMap::new(),
            observations: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Gate Session
// ============================================================================

/// Per-run evaluation state with a capability cache.
pub struct GateSession<'a, P> {
    /// Gate providing bindings.
    gate: &'a PreconditionGate,
    /// Probe consulted on cache misses.
    probe: P,
    /// Cached results keyed by capability.
    cache: BTreeMap<CapabilityName, ProbeStatus>,
    /// Probe calls in the order they were made.
    observations: Vec<ProbeRecord>,
}

impl<P: EnvironmentProbe> GateSession<'_, P> {
    /// Evaluates a single suite's precondition.
    ///
    /// # Errors
    ///
    /// Returns [`PreconditionError`] when the capability probe cannot answer.
    pub fn evaluate(&mut self, suite: &SuiteName) -> Result<GateDecision, PreconditionError> {
        let gate = self.gate;
        let Some(precondition) = gate.precondition(suite) else {
            return Ok(GateDecision::Runnable);
        };
        match self.capability_status(suite, &precondition.capability) {
            ProbeStatus::Supported => Ok(GateDecision::Runnable),
            ProbeStatus::Unsupported => Ok(GateDecision::Skipped {
                capability: precondition.capability.clone(),
                reason: precondition.skip_reason(),
            }),
            ProbeStatus::Failed {
                detail,
            } => Err(PreconditionError {
                suite: suite.clone(),
                capability: precondition.capability.clone(),
                detail,
            }),
        }
    }

    /// Decides the gate for a leaf reached through `suite_path`, outermost first.
    pub fn evaluate_path(&mut self, suite_path: &[SuiteName]) -> EntryGate {
        for suite in suite_path {
            match self.evaluate(suite) {
                Ok(GateDecision::Runnable) => {}
                Ok(GateDecision::Skipped {
                    capability,
                    reason,
                }) => {
                    return EntryGate::Skipped {
                        suite: suite.clone(),
                        capability,
                        reason,
                    };
                }
                Err(err) => {
                    return EntryGate::Blocked {
                        suite: err.suite,
                        capability: err.capability,
                        detail: err.detail,
                    };
                }
            }
        }
        EntryGate::Runnable
    }

    /// Returns the probe observations made so far.
    #[must_use]
    pub fn observations(&self) -> &[ProbeRecord] {
        &self.observations
    }

    /// Consumes the session and returns its probe observations.
    #[must_use]
    pub fn into_observations(self) -> Vec<ProbeRecord> {
        self.observations
    }

    /// Returns the cached status for a capability, probing on first use.
    fn capability_status(&mut self, suite: &SuiteName, capability: &CapabilityName) -> ProbeStatus {
        if let Some(status) = self.cache.get(capability) {
            return status.clone();
        }
        let status = match self.probe.query(capability) {
            Ok(ProbeAnswer::Supported) => ProbeStatus::Supported,
            Ok(ProbeAnswer::Unsupported) => ProbeStatus::Unsupported,
            Err(err) => ProbeStatus::Failed {
                detail: err.to_string(),
            },
        };
        self.observations.push(ProbeRecord {
            suite: suite.clone(),
            capability: capability.clone(),
            status: status.clone(),
        });
        self.cache.insert(capability.clone(), status.clone());
        status
    }
}
