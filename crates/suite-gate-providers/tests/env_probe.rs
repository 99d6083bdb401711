// crates/suite-gate-providers/tests/env_probe.rs
// ============================================================================
// Module: Env Probe Tests
// Description: Tests for environment-variable capability flags.
// ============================================================================
//! ## Overview
//! Validates variable naming, flag parsing, and missing or malformed values.

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

use suite_gate_core::CapabilityName;
use suite_gate_core::EnvironmentProbe;
use suite_gate_core::ProbeAnswer;
use suite_gate_core::ProbeError;
use suite_gate_providers::EnvProbe;
use suite_gate_providers::EnvProbeConfig;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an env probe reading only from the given overrides.
fn probe_with(overrides: &[(&str, &str)]) -> EnvProbe {
    EnvProbe::new(EnvProbeConfig {
        overrides: Some(
            overrides.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect(),
        ),
        ..EnvProbeConfig::default()
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn variable_name_normalizes_capability() {
    let probe = EnvProbe::new(EnvProbeConfig::default());
    assert_eq!(probe.variable_name(&CapabilityName::new("vpc")), "SUITE_GATE_CAP_VPC");
    assert_eq!(
        probe.variable_name(&CapabilityName::new("ec2.vpc-peering")),
        "SUITE_GATE_CAP_EC2_VPC_PEERING"
    );
}

#[test]
fn truthy_flag_is_supported() {
    let probe = probe_with(&[("SUITE_GATE_CAP_VPC", "yes")]);
    assert_eq!(probe.query(&CapabilityName::new("vpc")), Ok(ProbeAnswer::Supported));
}

#[test]
fn falsy_flag_is_unsupported() {
    let probe = probe_with(&[("SUITE_GATE_CAP_VPC", "0")]);
    assert_eq!(probe.query(&CapabilityName::new("vpc")), Ok(ProbeAnswer::Unsupported));
}

#[test]
fn missing_variable_is_unsupported() {
    let probe = probe_with(&[]);
    assert_eq!(probe.query(&CapabilityName::new("vpc")), Ok(ProbeAnswer::Unsupported));
}

#[test]
fn malformed_value_is_probe_failure() {
    let probe = probe_with(&[("SUITE_GATE_CAP_VPC", "sometimes")]);
    let err = probe.query(&CapabilityName::new("vpc")).expect_err("malformed flag");
    assert!(matches!(err, ProbeError::Failed(ref detail) if detail.contains("SUITE_GATE_CAP_VPC")));
}

#[test]
fn oversized_value_is_probe_failure() {
    let long = "x".repeat(128);
    let probe = probe_with(&[("SUITE_GATE_CAP_VPC", long.as_str())]);
    assert!(probe.query(&CapabilityName::new("vpc")).is_err());
}

#[test]
fn custom_prefix_is_used() {
    let mut overrides = BTreeMap::new();
    overrides.insert("CI_HAS_GPU".to_string(), "true".to_string());
    let probe = EnvProbe::new(EnvProbeConfig {
        prefix: "CI_HAS_".to_string(),
        overrides: Some(overrides),
        max_value_bytes: 16,
    });
    assert_eq!(probe.query(&CapabilityName::new("gpu")), Ok(ProbeAnswer::Supported));
}

#[test]
#[allow(unsafe_code, reason = "Test mutates a process env var unique to this test.")]
fn process_env_value_is_read_without_overrides() {
    let probe = EnvProbe::new(EnvProbeConfig::default());
    // SAFETY: The variable name is unique to this test and nothing reads it concurrently.
    unsafe {
        std::env::set_var("SUITE_GATE_CAP_ENV_READ_TEST", "yes");
    }
    let answer = probe.query(&CapabilityName::new("env_read_test"));
    // SAFETY: Same variable as above, removed after the query.
    unsafe {
        std::env::remove_var("SUITE_GATE_CAP_ENV_READ_TEST");
    }
    assert_eq!(answer, Ok(ProbeAnswer::Supported));
}

#[cfg(unix)]
#[test]
#[allow(unsafe_code, reason = "Test mutates a process env var unique to this test.")]
fn non_unicode_process_value_is_probe_failure() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let probe = EnvProbe::new(EnvProbeConfig::default());
    // SAFETY: The variable name is unique to this test and nothing reads it concurrently.
    unsafe {
        std::env::set_var("SUITE_GATE_CAP_NON_UNICODE_VPC", OsStr::from_bytes(&[0x74, 0xff, 0x65]));
    }
    let answer = probe.query(&CapabilityName::new("non_unicode_vpc"));
    // SAFETY: Same variable as above, removed after the query.
    unsafe {
        std::env::remove_var("SUITE_GATE_CAP_NON_UNICODE_VPC");
    }
    match answer {
        Err(ProbeError::Failed(detail)) => {
            assert!(detail.contains("SUITE_GATE_CAP_NON_UNICODE_VPC"), "detail: {detail}");
        }
        other => panic!("expected probe failure, got {other:?}"),
    }
}
