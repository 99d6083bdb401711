// crates/suite-gate-core/src/runtime/resolver.rs
// ============================================================================
// Module: Suite Gate Resolver
// Description: Depth-first expansion of nested suites into ordered leaves.
// Purpose: Produce a deterministic, cycle-free, de-duplicated leaf sequence.
// Dependencies: crate::core, crate::runtime::registry, thiserror
// ============================================================================

//! ## Overview
//! Resolution walks a suite's members in declaration order, inlining nested
//! suites in place (depth-first, pre-order). The walk keeps an explicit frame
//! stack instead of recursing, so the "currently expanding" set is the frame
//! stack itself and a cycle report is the stack plus the re-entered name.
//!
//! Invariants:
//! - Re-entering a suite that is still being expanded is a cycle.
//! - A leaf reached more than once keeps only its first position.
//! - A suite is expanded at most once per resolution; later references to a
//!   fully expanded suite contribute no new leaves and are skipped.
//! - Output depends only on registry contents, so resolution is idempotent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::LeafId;
use crate::core::Member;
use crate::core::SuiteDefinition;
use crate::core::SuiteName;
use crate::runtime::registry::SuiteRegistry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Structural errors raised while resolving a suite graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A referenced suite is not registered.
    #[error("suite not found: {suite}{}", referenced_by_suffix(.referenced_by.as_ref()))]
    NotFound {
        /// Missing suite name.
        suite: SuiteName,
        /// Suite whose members referenced the missing suite (`None` for the root).
        referenced_by: Option<SuiteName>,
    },
    /// The suite graph contains a reference cycle.
    #[error("suite reference cycle: {}", join_path(.path))]
    Cycle {
        /// Reference chain from the resolution root to the re-entered suite.
        path: Vec<SuiteName>,
    },
}

/// Formats the referencing suite for not-found errors.
fn referenced_by_suffix(referenced_by: Option<&SuiteName>) -> String {
    referenced_by.map_or_else(String::new, |parent| format!(" (referenced by {parent})"))
}

/// Joins a suite path with arrows for diagnostics.
fn join_path(path: &[SuiteName]) -> String {
    path.iter().map(SuiteName::as_str).collect::<Vec<_>>().join(" -> ")
}

// ============================================================================
// SECTION: Resolved Leaves
// ============================================================================

/// Leaf produced by resolution, with the suites it was reached through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLeaf {
    /// Leaf test identifier.
    pub leaf_id: LeafId,
    /// Suites from the resolution root to the leaf's parent, outermost first.
    pub suite_path: Vec<SuiteName>,
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Expands named suites against a registry.
#[derive(Debug, Clone, Copy)]
pub struct SuiteResolver<'a> {
    /// Registry providing suite definitions.
    registry: &'a SuiteRegistry,
}

/// Expansion frame for one suite on the walk stack.
struct Frame<'a> {
    /// Definition being expanded.
    definition: &'a SuiteDefinition,
    /// Index of the next member to visit.
    next: usize,
}

impl<'a> SuiteResolver<'a> {
    /// Creates a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'a SuiteRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Resolves a suite into its ordered, de-duplicated leaf identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a referenced suite is missing or the
    /// graph reachable from `name` contains a cycle.
    pub fn resolve(&self, name: &SuiteName) -> Result<Vec<LeafId>, ResolveError> {
        Ok(self.resolve_with_origins(name)?.into_iter().map(|leaf| leaf.leaf_id).collect())
    }

    /// Resolves a suite, keeping the suite path of each leaf's first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when a referenced suite is missing or the
    /// graph reachable from `name` contains a cycle.
    pub fn resolve_with_origins(&self, name: &SuiteName) -> Result<Vec<ResolvedLeaf>, ResolveError> {
        let root = self.lookup(name, None)?;
        let mut frames = vec![Frame {
            definition: root,
            next: 0,
        }];
        let mut seen: BTreeSet<&LeafId> = BTreeSet::new();
        let mut completed: BTreeSet<&SuiteName> = BTreeSet::new();
        let mut leaves = Vec::new();

        while let Some(frame) = frames.last_mut() {
            let definition = frame.definition;
            let Some(member) = definition.members.get(frame.next) else {
                completed.insert(&definition.name);
                frames.pop();
                continue;
            };
            frame.next += 1;

            match member {
                Member::Test(leaf_id) => {
                    if seen.insert(leaf_id) {
                        leaves.push(ResolvedLeaf {
                            leaf_id: leaf_id.clone(),
                            suite_path: frames
                                .iter()
                                .map(|frame| frame.definition.name.clone())
                                .collect(),
                        });
                    }
                }
                Member::Suite(child) => {
                    if completed.contains(child) {
                        continue;
                    }
                    if frames.iter().any(|frame| &frame.definition.name == child) {
                        let mut path: Vec<SuiteName> =
                            frames.iter().map(|frame| frame.definition.name.clone()).collect();
                        path.push(child.clone());
                        return Err(ResolveError::Cycle {
                            path,
                        });
                    }
                    let nested = self.lookup(child, Some(&definition.name))?;
                    frames.push(Frame {
                        definition: nested,
                        next: 0,
                    });
                }
            }
        }

        Ok(leaves)
    }

    /// Resolves every registered suite, surfacing the first structural error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] for the first suite (in name order) whose
    /// graph references a missing suite or contains a cycle.
    pub fn check_all(&self) -> Result<(), ResolveError> {
        for name in self.registry.all_names() {
            self.resolve_with_origins(name)?;
        }
        Ok(())
    }

    /// Looks up a suite, tagging misses with the referencing suite.
    fn lookup(
        &self,
        name: &SuiteName,
        referenced_by: Option<&SuiteName>,
    ) -> Result<&'a SuiteDefinition, ResolveError> {
        self.registry.lookup(name).map_err(|_| ResolveError::NotFound {
            suite: name.clone(),
            referenced_by: referenced_by.cloned(),
        })
    }
}
