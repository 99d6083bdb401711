// crates/suite-gate-core/tests/gate.rs
// ============================================================================
// Module: Precondition Gate Tests
// Description: Tests for precondition binding, probe caching, and path gating.
// ============================================================================
//! ## Overview
//! Validates that capability probes run at most once per session, that
//! unsupported answers skip while probe failures block, and that the
//! outermost gated suite decides a leaf's gate.

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

use std::collections::BTreeMap;
use std::sync::Mutex;

use suite_gate_core::CapabilityName;
use suite_gate_core::EntryGate;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::GateDecision;
use suite_gate_core::GateError;
use suite_gate_core::Precondition;
use suite_gate_core::PreconditionGate;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;
use suite_gate_core::ProbeStatus;
use suite_gate_core::SuiteName;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Probe with scripted answers that counts queries per capability.
#[derive(Default)]
struct CountingProbe {
    /// Scripted answers; unscripted capabilities are unroutable.
    answers: BTreeMap<String, Result<ProbeAnswer, String>>,
    /// Query counts keyed by capability.
    calls: Mutex<BTreeMap<String, usize>>,
}

impl CountingProbe {
    /// Adds a scripted answer.
    fn with(mut self, capability: &str, answer: Result<ProbeAnswer, &str>) -> Self {
        self.answers.insert(capability.to_string(), answer.map_err(str::to_string));
        self
    }

    /// Returns the number of queries made for a capability.
    fn calls(&self, capability: &str) -> usize {
        self.calls.lock().unwrap().get(capability).copied().unwrap_or_default()
    }
}

impl EnvironmentProbe for CountingProbe {
    fn query(&self, capability: &CapabilityName) -> Result<ProbeAnswer, ProbeError> {
        *self.calls.lock().unwrap().entry(capability.as_str().to_string()).or_default() += 1;
        match self.answers.get(capability.as_str()) {
            Some(Ok(answer)) => Ok(*answer),
            Some(Err(detail)) => Err(ProbeError::Failed(detail.clone())),
            None => Err(ProbeError::Unroutable(capability.clone())),
        }
    }
}

/// Converts names into a suite path.
fn path(names: &[&str]) -> Vec<SuiteName> {
    names.iter().map(|name| SuiteName::new(*name)).collect()
}

// ============================================================================
// SECTION: Binding
// ============================================================================

#[test]
fn second_binding_for_suite_is_rejected() {
    let mut gate = PreconditionGate::new();
    gate.bind("VpcSuite", Precondition::new("vpc")).expect("first bind");
    let err = gate.bind("VpcSuite", Precondition::new("other")).expect_err("second bind");
    assert_eq!(err, GateError::AlreadyBound(SuiteName::new("VpcSuite")));
    assert_eq!(
        gate.precondition(&SuiteName::new("VpcSuite")).map(|p| p.capability.as_str()),
        Some("vpc")
    );
    assert_eq!(gate.bound_suites().collect::<Vec<_>>(), vec![&SuiteName::new("VpcSuite")]);
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

#[test]
fn unbound_suite_is_runnable_without_probing() {
    let gate = PreconditionGate::new();
    let probe = CountingProbe::default();
    let mut session = gate.session(&probe);
    let decision = session.evaluate(&SuiteName::new("Plain")).expect("evaluate");
    assert_eq!(decision, GateDecision::Runnable);
    assert!(session.observations().is_empty());
    assert_eq!(probe.calls("vpc"), 0);
}

#[test]
fn supported_capability_is_runnable() {
    let mut gate = PreconditionGate::new();
    gate.bind("VpcSuite", Precondition::new("vpc")).expect("bind");
    let probe = CountingProbe::default().with("vpc", Ok(ProbeAnswer::Supported));
    let mut session = gate.session(&probe);
    assert_eq!(session.evaluate(&SuiteName::new("VpcSuite")).expect("evaluate"), GateDecision::Runnable);
}

#[test]
fn unsupported_capability_skips_with_reason() {
    let mut gate = PreconditionGate::new();
    gate.bind("VpcSuite", Precondition::new("vpc").with_reason("VPC is not a supported platform"))
        .expect("bind");
    let probe = CountingProbe::default().with("vpc", Ok(ProbeAnswer::Unsupported));
    let mut session = gate.session(&probe);
    assert_eq!(
        session.evaluate(&SuiteName::new("VpcSuite")).expect("evaluate"),
        GateDecision::Skipped {
            capability: CapabilityName::new("vpc"),
            reason: "VPC is not a supported platform".to_string(),
        }
    );
}

#[test]
fn probe_failure_is_an_error_not_a_skip() {
    let mut gate = PreconditionGate::new();
    gate.bind("VpcSuite", Precondition::new("vpc")).expect("bind");
    let probe = CountingProbe::default().with("vpc", Err("permission denied"));
    let mut session = gate.session(&probe);
    let err = session.evaluate(&SuiteName::new("VpcSuite")).expect_err("probe failure");
    assert_eq!(err.suite, SuiteName::new("VpcSuite"));
    assert_eq!(err.capability, CapabilityName::new("vpc"));
    assert!(err.detail.contains("permission denied"));
}

#[test]
fn shared_capability_is_probed_once_per_session() {
    let mut gate = PreconditionGate::new();
    gate.bind("A", Precondition::new("vpc")).expect("bind a");
    gate.bind("B", Precondition::new("vpc")).expect("bind b");
    let probe = CountingProbe::default().with("vpc", Ok(ProbeAnswer::Supported));

    let mut session = gate.session(&probe);
    session.evaluate(&SuiteName::new("A")).expect("evaluate a");
    session.evaluate(&SuiteName::new("B")).expect("evaluate b");
    session.evaluate(&SuiteName::new("A")).expect("evaluate a again");
    assert_eq!(probe.calls("vpc"), 1);
    assert_eq!(session.observations().len(), 1);
    assert_eq!(session.observations()[0].suite, SuiteName::new("A"));
}

#[test]
fn probe_failures_are_cached_too() {
    let mut gate = PreconditionGate::new();
    gate.bind("A", Precondition::new("vpc")).expect("bind a");
    gate.bind("B", Precondition::new("vpc")).expect("bind b");
    let probe = CountingProbe::default().with("vpc", Err("timeout"));

    let mut session = gate.session(&probe);
    assert!(session.evaluate(&SuiteName::new("A")).is_err());
    assert!(session.evaluate(&SuiteName::new("B")).is_err());
    assert_eq!(probe.calls("vpc"), 1);
}

#[test]
fn new_session_probes_again() {
    let mut gate = PreconditionGate::new();
    gate.bind("A", Precondition::new("vpc")).expect("bind");
    let probe = CountingProbe::default().with("vpc", Ok(ProbeAnswer::Supported));

    gate.session(&probe).evaluate(&SuiteName::new("A")).expect("first session");
    gate.session(&probe).evaluate(&SuiteName::new("A")).expect("second session");
    assert_eq!(probe.calls("vpc"), 2);
}

// ============================================================================
// SECTION: Path Gating
// ============================================================================

#[test]
fn outermost_skip_wins_and_inner_suites_are_not_probed() {
    let mut gate = PreconditionGate::new();
    gate.bind("Outer", Precondition::new("vpc")).expect("bind outer");
    gate.bind("Inner", Precondition::new("gpu")).expect("bind inner");
    let probe = CountingProbe::default()
        .with("vpc", Ok(ProbeAnswer::Unsupported))
        .with("gpu", Err("unreachable"));

    let mut session = gate.session(&probe);
    let decision = session.evaluate_path(&path(&["Root", "Outer", "Inner"]));
    assert!(matches!(
        decision,
        EntryGate::Skipped { ref suite, .. } if suite.as_str() == "Outer"
    ));
    assert_eq!(probe.calls("gpu"), 0);
}

#[test]
fn inner_probe_failure_blocks_when_outer_supported() {
    let mut gate = PreconditionGate::new();
    gate.bind("Outer", Precondition::new("vpc")).expect("bind outer");
    gate.bind("Inner", Precondition::new("gpu")).expect("bind inner");
    let probe = CountingProbe::default().with("vpc", Ok(ProbeAnswer::Supported));

    let mut session = gate.session(&probe);
    let decision = session.evaluate_path(&path(&["Outer", "Inner"]));
    match decision {
        EntryGate::Blocked {
            suite,
            capability,
            detail,
        } => {
            assert_eq!(suite, SuiteName::new("Inner"));
            assert_eq!(capability, CapabilityName::new("gpu"));
            assert!(detail.contains("gpu"));
        }
        other => panic!("expected blocked gate, got {other:?}"),
    }

    let statuses: Vec<ProbeStatus> =
        session.into_observations().into_iter().map(|record| record.status).collect();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0], ProbeStatus::Supported);
    assert!(matches!(statuses[1], ProbeStatus::Failed { .. }));
}

#[test]
fn ungated_path_is_runnable() {
    let gate = PreconditionGate::new();
    let probe = CountingProbe::default();
    let mut session = gate.session(&probe);
    assert_eq!(session.evaluate_path(&path(&["A", "B"])), EntryGate::Runnable);
}
