// crates/suite-gate-core/src/core/suite.rs
// ============================================================================
// Module: Suite Gate Suite Definitions
// Description: Suite definitions, members, and capability preconditions.
// Purpose: Define the declarative building blocks of a suite graph.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A suite is a named, ordered list of members. Members are either leaf tests
//! or references to other suites by name; references are resolved lazily by
//! the resolver so definitions can be registered in any order. Member order is
//! execution order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CapabilityName;
use crate::core::identifiers::LeafId;
use crate::core::identifiers::SuiteName;

// ============================================================================
// SECTION: Members
// ============================================================================

/// A single entry in a suite's ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    /// Leaf test executed by the external executor.
    Test(LeafId),
    /// Unresolved reference to another suite definition.
    Suite(SuiteName),
}

impl Member {
    /// Creates a leaf test member.
    #[must_use]
    pub fn test(id: impl Into<LeafId>) -> Self {
        Self::Test(id.into())
    }

    /// Creates a nested suite reference member.
    #[must_use]
    pub fn suite(name: impl Into<SuiteName>) -> Self {
        Self::Suite(name.into())
    }
}

// ============================================================================
// SECTION: Suite Definition
// ============================================================================

/// Named, ordered collection of leaf tests and nested suite references.
///
/// # Invariants
/// - Immutable once registered.
/// - `members` order is preserved through resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteDefinition {
    /// Unique suite name.
    pub name: SuiteName,
    /// Ordered members.
    pub members: Vec<Member>,
}

impl SuiteDefinition {
    /// Creates a new suite definition.
    #[must_use]
    pub fn new(name: impl Into<SuiteName>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

// ============================================================================
// SECTION: Preconditions
// ============================================================================

/// Capability predicate gating every leaf beneath a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    /// Capability that must be supported for the suite to run.
    pub capability: CapabilityName,
    /// Optional skip reason reported when the capability is unsupported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Precondition {
    /// Creates a precondition with the default skip reason.
    #[must_use]
    pub fn new(capability: impl Into<CapabilityName>) -> Self {
        Self {
            capability: capability.into(),
            reason: None,
        }
    }

    /// Overrides the skip reason reported when the capability is unsupported.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the human-readable skip reason.
    #[must_use]
    pub fn skip_reason(&self) -> String {
        self.reason
            .clone()
            .unwrap_or_else(|| format!("{} is not a supported platform", self.capability))
    }
}
