// crates/suite-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and report target selection.
// Purpose: Pin CLI surface behavior without spawning the binary.
// Dependencies: suite-gate-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap parsing of each subcommand and how `--report-file` and the
//! `[report]` section combine into a reporter destination.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use suite_gate_config::ReportConfig;
use suite_gate_config::ReportSink;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::OutputFormat;
use super::ReportTarget;
use super::SuitesCommand;
use super::report_target;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("suite-gate").chain(args.iter().copied()))
        .expect("parse cli")
}

fn report_config(sink: ReportSink, path: Option<&str>) -> ReportConfig {
    ReportConfig {
        sink,
        path: path.map(PathBuf::from),
    }
}

// ============================================================================
// SECTION: Parsing Tests
// ============================================================================

#[test]
fn plan_parses_suite_format_and_config() {
    let cli = parse(&["plan", "Full", "--format", "json", "--config", "gate.toml"]);
    match cli.command {
        Some(Commands::Plan(command)) => {
            assert_eq!(command.suite, "Full");
            assert_eq!(command.format, OutputFormat::Json);
            assert_eq!(command.config.config.as_deref(), Some(Path::new("gate.toml")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn run_defaults_to_text_without_report_file() {
    let cli = parse(&["run", "Short"]);
    match cli.command {
        Some(Commands::Run(command)) => {
            assert_eq!(command.suite, "Short");
            assert_eq!(command.format, OutputFormat::Text);
            assert!(command.report_file.is_none());
            assert!(command.config.config.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn nested_subcommands_parse() {
    assert!(matches!(
        parse(&["suites", "list"]).command,
        Some(Commands::Suites {
            command: SuitesCommand::List(_)
        })
    ));
    assert!(matches!(
        parse(&["config", "validate"]).command,
        Some(Commands::Config {
            command: ConfigCommand::Validate(_)
        })
    ));
}

#[test]
fn version_flag_is_global() {
    assert!(parse(&["--version"]).show_version);
    assert!(parse(&["suites", "list", "--version"]).show_version);
}

#[test]
fn run_requires_a_suite() {
    assert!(Cli::try_parse_from(["suite-gate", "run"]).is_err());
}

// ============================================================================
// SECTION: Report Target Tests
// ============================================================================

#[test]
fn report_file_flag_overrides_config() {
    let config = report_config(ReportSink::None, None);
    assert_eq!(
        report_target(&config, Some(Path::new("events.jsonl"))),
        ReportTarget::File(PathBuf::from("events.jsonl"))
    );
}

#[test]
fn config_sink_selects_target() {
    assert_eq!(report_target(&report_config(ReportSink::Stderr, None), None), ReportTarget::Stderr);
    assert_eq!(report_target(&report_config(ReportSink::None, None), None), ReportTarget::Discard);
    assert_eq!(
        report_target(&report_config(ReportSink::File, Some("out.jsonl")), None),
        ReportTarget::File(PathBuf::from("out.jsonl"))
    );
}
