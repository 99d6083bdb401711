// crates/suite-gate-core/src/core/plan.rs
// ============================================================================
// Module: Suite Gate Resolved Plans
// Description: Flattened, de-duplicated, gated execution plans.
// Purpose: Carry the planner's output to the execution coordinator.
// Dependencies: crate::core::identifiers, serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! A [`ResolvedPlan`] is produced fresh for every invocation. Each entry names
//! one leaf at its first resolved position, the chain of suites it was reached
//! through, and the gating decision taken for its subtree. Probe observations
//! made while gating are retained in observation order for traceability.
//!
//! A plan's [`PlanFingerprint`] is the SHA-256 of its RFC 8785 (JCS) canonical
//! JSON, so two resolutions of the same registry state fingerprint equal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::core::identifiers::CapabilityName;
use crate::core::identifiers::LeafId;
use crate::core::identifiers::SuiteName;

// ============================================================================
// SECTION: Entry Gating
// ============================================================================

/// Gating decision attached to a plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryGate {
    /// Leaf may be executed.
    Runnable,
    /// An enclosing suite's capability is unsupported.
    Skipped {
        /// Outermost gated suite that decided the skip.
        suite: SuiteName,
        /// Capability that was reported unsupported.
        capability: CapabilityName,
        /// Human-readable skip reason.
        reason: String,
    },
    /// An enclosing suite's capability probe could not be answered.
    Blocked {
        /// Outermost gated suite whose probe failed.
        suite: SuiteName,
        /// Capability whose probe failed.
        capability: CapabilityName,
        /// Probe failure detail.
        detail: String,
    },
}

// ============================================================================
// SECTION: Plan Entries
// ============================================================================

/// One leaf of a resolved plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Leaf test identifier.
    pub leaf_id: LeafId,
    /// Suites traversed from the plan root to the leaf's parent.
    pub suite_path: Vec<SuiteName>,
    /// Gating decision for the leaf's subtree.
    pub gate: EntryGate,
}

impl PlanEntry {
    /// Returns true when the entry must not be handed to the executor.
    #[must_use]
    pub const fn is_gated(&self) -> bool {
        !matches!(self.gate, EntryGate::Runnable)
    }

    /// Returns the skip reason when the entry was skipped.
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        match &self.gate {
            EntryGate::Skipped {
                reason, ..
            } => Some(reason),
            EntryGate::Runnable | EntryGate::Blocked { .. } => None,
        }
    }
}

// ============================================================================
// SECTION: Probe Records
// ============================================================================

/// Observed result of a capability probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The environment supports the capability.
    Supported,
    /// The environment answered that the capability is unsupported.
    Unsupported,
    /// The probe could not answer.
    Failed {
        /// Failure detail.
        detail: String,
    },
}

/// Probe observation captured while gating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeRecord {
    /// Suite whose precondition triggered the probe.
    pub suite: SuiteName,
    /// Capability queried.
    pub capability: CapabilityName,
    /// Observed status.
    pub status: ProbeStatus,
}

// ============================================================================
// SECTION: Resolved Plan
// ============================================================================

/// Flattened, ordered, de-duplicated, gated sequence of leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    /// Suite the plan was resolved from.
    pub suite: SuiteName,
    /// Plan entries in execution order.
    pub entries: Vec<PlanEntry>,
    /// Probe observations in the order they were made.
    pub probes: Vec<ProbeRecord>,
}

impl ResolvedPlan {
    /// Returns leaf identifiers in execution order.
    pub fn leaf_ids(&self) -> impl Iterator<Item = &LeafId> {
        self.entries.iter().map(|entry| &entry.leaf_id)
    }

    /// Returns the number of entries that will reach the executor.
    #[must_use]
    pub fn runnable_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_gated()).count()
    }

    /// Returns the number of entries in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the plan contains no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fingerprints the plan over its canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError`] when the plan cannot be canonicalized.
    pub fn fingerprint(&self) -> Result<PlanFingerprint, FingerprintError> {
        let canonical =
            serde_jcs::to_vec(self).map_err(|err| FingerprintError(err.to_string()))?;
        Ok(PlanFingerprint::from_digest(&Sha256::digest(&canonical)))
    }
}

// ============================================================================
// SECTION: Fingerprint
// ============================================================================

/// Label prefixed to every plan fingerprint.
const FINGERPRINT_PREFIX: &str = "sha256:";

/// Canonical SHA-256 fingerprint of a [`ResolvedPlan`], as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanFingerprint(String);

impl PlanFingerprint {
    /// Formats raw digest bytes as a labeled lowercase hex string.
    fn from_digest(digest: &[u8]) -> Self {
        let mut value = String::with_capacity(FINGERPRINT_PREFIX.len() + digest.len() * 2);
        value.push_str(FINGERPRINT_PREFIX);
        for byte in digest {
            let _ = write!(value, "{byte:02x}");
        }
        Self(value)
    }

    /// Returns the fingerprint string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plan canonicalization failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to canonicalize plan: {0}")]
pub struct FingerprintError(String);
