// crates/suite-gate-cli/src/main.rs
// ============================================================================
// Module: Suite Gate CLI Entry Point
// Description: Command dispatcher for suite listing, planning, and runs.
// Purpose: Provide a localized CLI over the Suite Gate config and runtime.
// Dependencies: clap, serde, serde_json, suite-gate-{config, core, providers}, thiserror.
// ============================================================================

//! ## Overview
//! The Suite Gate CLI loads a TOML suite configuration, resolves a named
//! suite into a gated execution plan, and optionally runs that plan through
//! the configured process executor. All user-facing strings are routed
//! through the i18n catalog.
//!
//! Exit codes: `0` on success, `1` when a run has failures, errors, blocked
//! leaves, or was aborted, and `1` for any configuration or planning error.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use suite_gate_cli::render::SuiteListing;
use suite_gate_cli::render::render_plan;
use suite_gate_cli::render::render_report;
use suite_gate_cli::render::render_suite_list;
use suite_gate_cli::t;
use suite_gate_config::ReportConfig;
use suite_gate_config::ReportSink;
use suite_gate_config::SuiteGateConfig;
use suite_gate_core::ExecutionCoordinator;
use suite_gate_core::JsonLinesReporter;
use suite_gate_core::NoopReporter;
use suite_gate_core::Reporter;
use suite_gate_core::ResolvedPlan;
use suite_gate_core::SuiteName;
use suite_gate_core::SuitePlanner;
use suite_gate_core::SuiteResolver;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "suite-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Suite discovery utilities.
    Suites {
        /// Selected suites subcommand.
        #[command(subcommand)]
        command: SuitesCommand,
    },
    /// Resolve and gate a suite without executing it.
    Plan(PlanCommand),
    /// Resolve, gate, and execute a suite.
    Run(RunCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Suites subcommands.
#[derive(Subcommand, Debug)]
enum SuitesCommand {
    /// List configured suites.
    List(SuitesListCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Suite Gate configuration file.
    Validate(ConfigValidateCommand),
}

/// Shared config location argument.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Optional config file path (defaults to suite-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Pretty-printed JSON output.
    Json,
    /// Human-readable text output.
    Text,
}

/// Arguments for `suites list`.
#[derive(Args, Debug)]
struct SuitesListCommand {
    /// Config location.
    #[command(flatten)]
    config: ConfigArgs,
    /// Output format for the listing.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `plan`.
#[derive(Args, Debug)]
struct PlanCommand {
    /// Suite to resolve.
    #[arg(value_name = "SUITE")]
    suite: String,
    /// Config location.
    #[command(flatten)]
    config: ConfigArgs,
    /// Output format for the plan.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Suite to execute.
    #[arg(value_name = "SUITE")]
    suite: String,
    /// Config location.
    #[command(flatten)]
    config: ConfigArgs,
    /// Output format for the run report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Append JSON-line run events to this file (overrides `[report]`).
    #[arg(long = "report-file", value_name = "PATH")]
    report_file: Option<PathBuf>,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config location.
    #[command(flatten)]
    config: ConfigArgs,
}

/// JSON row for `suites list`.
#[derive(Debug, Serialize)]
struct SuiteListEntry<'a> {
    /// Suite name.
    name: &'a SuiteName,
    /// Number of direct members.
    members: usize,
    /// Gating capability, when the suite has a precondition.
    capability: Option<&'a str>,
}

/// Resolved destination for run events.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReportTarget {
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File(PathBuf),
    /// Events discarded.
    Discard,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Suites {
            command: SuitesCommand::List(command),
        } => command_suites_list(&command),
        Commands::Plan(command) => command_plan(&command),
        Commands::Run(command) => command_run(&command),
        Commands::Config {
            command: ConfigCommand::Validate(command),
        } => command_config_validate(&command),
    }
}

/// Prints the top-level help text.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Suites Command
// ============================================================================

/// Executes `suites list`.
fn command_suites_list(command: &SuitesListCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    match command.format {
        OutputFormat::Text => {
            let listings: Vec<SuiteListing<'_>> = config
                .suites
                .iter()
                .map(|suite| SuiteListing {
                    name: &suite.name,
                    members: suite.members.len(),
                    precondition: suite.precondition.as_ref(),
                })
                .collect();
            write_lines(&render_suite_list(&listings))?;
        }
        OutputFormat::Json => {
            let entries: Vec<SuiteListEntry<'_>> = config
                .suites
                .iter()
                .map(|suite| SuiteListEntry {
                    name: &suite.name,
                    members: suite.members.len(),
                    capability: suite
                        .precondition
                        .as_ref()
                        .map(|precondition| precondition.capability.as_str()),
                })
                .collect();
            write_json(&entries)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Plan Command
// ============================================================================

/// Executes `plan`.
fn command_plan(command: &PlanCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let plan = build_plan(&config, &command.suite)?;
    match command.format {
        OutputFormat::Text => write_lines(&render_plan(&plan))?,
        OutputFormat::Json => write_json(&plan)?,
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolves and gates the named suite using config-built collaborators.
fn build_plan(config: &SuiteGateConfig, suite: &str) -> CliResult<ResolvedPlan> {
    let registry = config.suite_registry().map_err(config_build_error)?;
    let gate = config.precondition_gate().map_err(config_build_error)?;
    let probes = config.probe_registry().map_err(config_build_error)?;
    SuitePlanner::new(&registry, &gate)
        .plan(&SuiteName::new(suite), &probes)
        .map_err(|err| CliError::new(t!("plan.failed", suite = suite, error = err)))
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes `run`.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let Some(executor) = config.process_executor() else {
        return Err(CliError::new(t!("run.executor_missing")));
    };
    let plan = build_plan(&config, &command.suite)?;
    let target = report_target(&config.report, command.report_file.as_deref());
    let reporter = open_reporter(&target)?;

    let report = ExecutionCoordinator::new(executor, reporter).run(&plan);
    match command.format {
        OutputFormat::Text => write_lines(&render_report(&report))?,
        OutputFormat::Json => write_json(&report)?,
    }
    if report.is_success() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Chooses the event destination; an explicit file flag wins over config.
fn report_target(config: &ReportConfig, override_path: Option<&Path>) -> ReportTarget {
    if let Some(path) = override_path {
        return ReportTarget::File(path.to_path_buf());
    }
    match (config.sink, &config.path) {
        (ReportSink::Stderr, _) => ReportTarget::Stderr,
        (ReportSink::File, Some(path)) => ReportTarget::File(path.clone()),
        (ReportSink::File, None) | (ReportSink::None, _) => ReportTarget::Discard,
    }
}

/// Opens the reporter for a target.
fn open_reporter(target: &ReportTarget) -> CliResult<Box<dyn Reporter>> {
    match target {
        ReportTarget::Stderr => Ok(Box::new(JsonLinesReporter::stderr())),
        ReportTarget::File(path) => {
            let reporter = JsonLinesReporter::open_file(path).map_err(|err| {
                CliError::new(t!("run.report_file_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(reporter))
        }
        ReportTarget::Discard => Ok(Box::new(NoopReporter)),
    }
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes `config validate`.
///
/// Beyond parsing, this builds every collaborator and resolves every suite so
/// graph faults surface before a run.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let registry = config.suite_registry().map_err(config_build_error)?;
    let gate = config.precondition_gate().map_err(config_build_error)?;
    config.probe_registry().map_err(config_build_error)?;
    SuitePlanner::new(&registry, &gate)
        .validate()
        .map_err(|err| CliError::new(t!("config.validate.graph_failed", error = err)))?;
    SuiteResolver::new(&registry)
        .check_all()
        .map_err(|err| CliError::new(t!("config.validate.graph_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok", suites = registry.len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Helpers
// ============================================================================

/// Loads configuration from the shared arguments.
fn load_config(args: &ConfigArgs) -> CliResult<SuiteGateConfig> {
    SuiteGateConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Wraps a collaborator construction failure.
fn config_build_error(err: suite_gate_config::ConfigError) -> CliError {
    CliError::new(t!("config.build_failed", error = err))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes rendered lines to stdout.
fn write_lines(lines: &[String]) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(&mut stdout, "{line}").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes a value as pretty JSON to stdout.
fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
