// crates/suite-gate-core/tests/registry.rs
// ============================================================================
// Module: Suite Registry Tests
// Description: Tests for suite registration and lookup.
// ============================================================================
//! ## Overview
//! Validates duplicate rejection, lookup misses, and name enumeration.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use suite_gate_core::Member;
use suite_gate_core::RegistryError;
use suite_gate_core::SuiteDefinition;
use suite_gate_core::SuiteName;
use suite_gate_core::SuiteRegistry;

// ============================================================================
// SECTION: Registration
// ============================================================================

#[test]
fn register_then_lookup_returns_definition() {
    let mut registry = SuiteRegistry::new();
    registry
        .register("Short", vec![Member::test("t1"), Member::test("t2")])
        .expect("register short");

    let definition = registry.lookup(&SuiteName::new("Short")).expect("lookup short");
    assert_eq!(definition.name.as_str(), "Short");
    assert_eq!(definition.members, vec![Member::test("t1"), Member::test("t2")]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_registration_keeps_existing_definition() {
    let mut registry = SuiteRegistry::new();
    registry.register("Short", vec![Member::test("t1")]).expect("first register");

    let err = registry
        .register("Short", vec![Member::test("other")])
        .expect_err("duplicate must fail");
    assert_eq!(err, RegistryError::DuplicateSuite(SuiteName::new("Short")));

    let definition = registry.lookup(&SuiteName::new("Short")).expect("lookup short");
    assert_eq!(definition.members, vec![Member::test("t1")]);
}

#[test]
fn register_definition_accepts_prebuilt_suite() {
    let mut registry = SuiteRegistry::new();
    registry
        .register_definition(SuiteDefinition::new("Full", vec![Member::suite("Short")]))
        .expect("register full");
    assert!(registry.contains(&SuiteName::new("Full")));
    assert!(!registry.contains(&SuiteName::new("Short")));
}

#[test]
fn empty_suite_is_allowed() {
    let mut registry = SuiteRegistry::new();
    registry.register("Empty", Vec::new()).expect("register empty");
    let definition = registry.lookup(&SuiteName::new("Empty")).expect("lookup empty");
    assert!(definition.members.is_empty());
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

#[test]
fn lookup_unknown_suite_fails() {
    let registry = SuiteRegistry::new();
    let err = registry.lookup(&SuiteName::new("Missing")).expect_err("missing suite");
    assert_eq!(err, RegistryError::NotFound(SuiteName::new("Missing")));
    assert!(registry.is_empty());
}

#[test]
fn all_names_is_finite_and_restartable() {
    let mut registry = SuiteRegistry::new();
    registry.register("b", Vec::new()).expect("register b");
    registry.register("a", Vec::new()).expect("register a");
    registry.register("c", Vec::new()).expect("register c");

    let names = registry.all_names();
    let first: Vec<&str> = names.clone().map(SuiteName::as_str).collect();
    let second: Vec<&str> = names.map(SuiteName::as_str).collect();
    assert_eq!(first, vec!["a", "b", "c"]);
    assert_eq!(first, second);
}
