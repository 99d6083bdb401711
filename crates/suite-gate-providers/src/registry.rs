// crates/suite-gate-providers/src/registry.rs
// ============================================================================
// Module: Probe Registry
// Description: Registry routing capability queries to named probes.
// Purpose: Combine several probes behind one EnvironmentProbe.
// Dependencies: suite-gate-core, thiserror
// ============================================================================

//! ## Overview
//! The probe registry holds named probes and routes each capability either
//! to an explicitly configured probe or to the default probe. Capabilities
//! with neither route fail as unroutable, which the gate treats as a probe
//! failure for the affected subtree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use suite_gate_core::CapabilityName;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while assembling a probe registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeRegistryError {
    /// A probe with the same identifier is already registered.
    #[error("probe already registered: {0}")]
    DuplicateProbe(String),
    /// A route or default names a probe that is not registered.
    #[error("probe not registered: {0}")]
    UnknownProbe(String),
}

// ============================================================================
// SECTION: Probe Registry
// ============================================================================

/// Capability probe registry with per-capability routing.
///
/// # Invariants
/// - Probe identifiers are unique within the registry.
/// - Routes and the default only ever name registered probes.
#[derive(Default)]
pub struct ProbeRegistry {
    /// Probe implementations keyed by identifier.
    probes: BTreeMap<String, Box<dyn EnvironmentProbe + Send + Sync>>,
    /// Explicit capability routes.
    routes: BTreeMap<CapabilityName, String>,
    /// Probe used for capabilities without an explicit route.
    default_probe: Option<String>,
}

impl ProbeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a probe under an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeRegistryError::DuplicateProbe`] when the identifier is taken.
    pub fn register_probe(
        &mut self,
        probe_id: impl Into<String>,
        probe: impl EnvironmentProbe + Send + Sync + 'static,
    ) -> Result<(), ProbeRegistryError> {
        let probe_id = probe_id.into();
        if self.probes.contains_key(&probe_id) {
            return Err(ProbeRegistryError::DuplicateProbe(probe_id));
        }
        self.probes.insert(probe_id, Box::new(probe));
        Ok(())
    }

    /// Routes a capability to a registered probe.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeRegistryError::UnknownProbe`] when the probe is not registered.
    pub fn route(
        &mut self,
        capability: impl Into<CapabilityName>,
        probe_id: impl Into<String>,
    ) -> Result<(), ProbeRegistryError> {
        let probe_id = self.known(probe_id.into())?;
        self.routes.insert(capability.into(), probe_id);
        Ok(())
    }

    /// Sets the probe used for unrouted capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeRegistryError::UnknownProbe`] when the probe is not registered.
    pub fn set_default(&mut self, probe_id: impl Into<String>) -> Result<(), ProbeRegistryError> {
        self.default_probe = Some(self.known(probe_id.into())?);
        Ok(())
    }

    /// Returns the probe identifier a capability routes to, if any.
    #[must_use]
    pub fn probe_for(&self, capability: &CapabilityName) -> Option<&str> {
        self.routes.get(capability).or(self.default_probe.as_ref()).map(String::as_str)
    }

    /// Returns registered probe identifiers in lexical order.
    pub fn probe_ids(&self) -> impl Iterator<Item = &str> {
        self.probes.keys().map(String::as_str)
    }

    /// Checks that a probe identifier is registered.
    fn known(&self, probe_id: String) -> Result<String, ProbeRegistryError> {
        if self.probes.contains_key(&probe_id) {
            Ok(probe_id)
        } else {
            Err(ProbeRegistryError::UnknownProbe(probe_id))
        }
    }
}

impl EnvironmentProbe for ProbeRegistry {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        let Some(probe) = self.probe_for(capability).and_then(|id| self.probes.get(id)) else {
            return Err(ProbeError::Unroutable(capability.clone()));
        };
        probe.query(capability)
    }
}
