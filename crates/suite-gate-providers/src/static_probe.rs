// crates/suite-gate-providers/src/static_probe.rs
// ============================================================================
// Module: Static Capability Probe
// Description: Capability probe backed by a fixed answer map.
// Purpose: Declare environment capabilities directly in configuration.
// Dependencies: suite-gate-core
// ============================================================================

//! ## Overview
//! The static probe answers from a map fixed at construction. Capabilities
//! absent from the map are reported unsupported, so a declared environment
//! only needs to list what it actually offers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use suite_gate_core::CapabilityName;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;

// ============================================================================
// SECTION: Probe Implementation
// ============================================================================

/// Capability probe with fixed answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
    /// Declared capability support.
    answers: BTreeMap<CapabilityName, bool>,
}

impl StaticProbe {
    /// Creates a probe from declared capability support.
    #[must_use]
    pub const fn new(answers: BTreeMap<CapabilityName, bool>) -> Self {
        Self {
            answers,
        }
    }

    /// Declares a capability as supported or not.
    #[must_use]
    pub fn with(mut self, capability: impl Into<CapabilityName>, supported: bool) -> Self {
        self.answers.insert(capability.into(), supported);
        self
    }
}

impl EnvironmentProbe for StaticProbe {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        match self.answers.get(capability) {
            Some(true) => Ok(ProbeAnswer::Supported),
            Some(false) | None => Ok(ProbeAnswer::Unsupported),
        }
    }
}
