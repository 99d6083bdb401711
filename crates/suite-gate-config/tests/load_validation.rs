// crates/suite-gate-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, shape).
// Purpose: Ensure config input handling is strict and fail-closed.
// ============================================================================

//! Config load validation tests for suite-gate-config.

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

use std::io::Write;
use std::path::Path;

use suite_gate_config::ConfigError;
use suite_gate_config::SuiteGateConfig;
use tempfile::NamedTempFile;

/// Result type for fallible tests.
type TestResult = Result<(), String>;

/// Asserts that a load failed with a message containing `needle`.
fn assert_invalid(result: Result<SuiteGateConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

/// Writes TOML to a temp file and loads it.
fn load_toml(content: &str) -> Result<Result<SuiteGateConfig, ConfigError>, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(SuiteGateConfig::load(Some(file.path())))
}

// ============================================================================
// SECTION: Path, Size, Encoding
// ============================================================================

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(SuiteGateConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    assert_invalid(
        SuiteGateConfig::load(Some(Path::new(&long_component))),
        "config path component too long",
    )
}

#[test]
fn load_reports_missing_file_as_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match SuiteGateConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&vec![b'#'; 1_048_577]).map_err(|err| err.to_string())?;
    assert_invalid(SuiteGateConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(SuiteGateConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_malformed_toml() -> TestResult {
    assert_invalid(load_toml("[[suites]\nname = ")?, "config parse error")
}

#[test]
fn load_rejects_unknown_fields() -> TestResult {
    assert_invalid(load_toml("[report]\nsink = \"stderr\"\ncolour = true\n")?, "config parse error")
}

// ============================================================================
// SECTION: Shape Validation
// ============================================================================

#[test]
fn empty_file_is_valid() -> TestResult {
    let config = load_toml("")?.map_err(|err| err.to_string())?;
    if config.suites.is_empty() && config.executor.is_none() {
        Ok(())
    } else {
        Err("expected empty config".to_string())
    }
}

#[test]
fn rejects_duplicate_suite_names() -> TestResult {
    let toml = r#"
[[suites]]
name = "Short"

[[suites]]
name = "Short"
"#;
    assert_invalid(load_toml(toml)?, "duplicate suite name: Short")
}

#[test]
fn rejects_empty_names() -> TestResult {
    assert_invalid(load_toml("[[suites]]\nname = \" \"\n")?, "suite name must be non-empty")?;
    let toml = r#"
[[suites]]
name = "Short"
members = [{ test = "" }]
"#;
    assert_invalid(load_toml(toml)?, "leaf id must be non-empty")
}

#[test]
fn rejects_empty_precondition_capability() -> TestResult {
    let toml = r#"
[[suites]]
name = "VpcSuite"
precondition = { capability = "" }
"#;
    assert_invalid(load_toml(toml)?, "precondition capability must be non-empty")
}

#[test]
fn rejects_command_route_without_command_probe() -> TestResult {
    let toml = r#"
[probe.routes]
vpc = "command"
"#;
    assert_invalid(load_toml(toml)?, "probe.command is not configured")
}

#[test]
fn rejects_overlapping_exit_codes() -> TestResult {
    let toml = r#"
[executor]
program = "cargo"
failure_codes = [1, 2]
fatal_codes = [2]
"#;
    assert_invalid(load_toml(toml)?, "exit code 2 is both a failure and a fatal code")
}

#[test]
fn rejects_zero_exit_code_mapping() -> TestResult {
    let toml = r#"
[executor]
program = "cargo"
fatal_codes = [0]
"#;
    assert_invalid(load_toml(toml)?, "exit code 0 is reserved")
}

#[test]
fn rejects_file_sink_without_path() -> TestResult {
    assert_invalid(load_toml("[report]\nsink = \"file\"\n")?, "report.path is required")
}
