// crates/suite-gate-core/src/runtime/registry.rs
// ============================================================================
// Module: Suite Gate Registry
// Description: Name-keyed storage for suite definitions.
// Purpose: Hold immutable suite definitions for resolution.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The registry is pure data: registration and lookup. It is read-only once
//! setup completes and can be shared across independent runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::Member;
use crate::core::SuiteDefinition;
use crate::core::SuiteName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry registration and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A suite with the same name is already registered.
    #[error("suite already registered: {0}")]
    DuplicateSuite(SuiteName),
    /// No suite is registered under the name.
    #[error("suite not found: {0}")]
    NotFound(SuiteName),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of suite definitions keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct SuiteRegistry {
    /// Definitions keyed by suite name.
    suites: BTreeMap<SuiteName, SuiteDefinition>,
}

impl SuiteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            suites: BTreeMap::new(),
        }
    }

    /// Registers a suite definition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSuite`] when the name is already
    /// present; the existing definition is left untouched.
    pub fn register(
        &mut self,
        name: impl Into<SuiteName>,
        members: Vec<Member>,
    ) -> Result<(), RegistryError> {
        self.register_definition(SuiteDefinition::new(name, members))
    }

    /// Registers a prebuilt suite definition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateSuite`] when the name is already present.
    pub fn register_definition(&mut self, definition: SuiteDefinition) -> Result<(), RegistryError> {
        if self.suites.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateSuite(definition.name));
        }
        self.suites.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Looks up a suite definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no suite has the name.
    pub fn lookup(&self, name: &SuiteName) -> Result<&SuiteDefinition, RegistryError> {
        self.suites.get(name).ok_or_else(|| RegistryError::NotFound(name.clone()))
    }

    /// Returns true when a suite is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &SuiteName) -> bool {
        self.suites.contains_key(name)
    }

    /// Returns registered suite names.
    ///
    /// The iterator is finite and cloneable, so it can be restarted.
    pub fn all_names(&self) -> impl Iterator<Item = &SuiteName> + Clone {
        self.suites.keys()
    }

    /// Returns the number of registered suites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suites.len()
    }

    /// Returns true when no suites are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}
