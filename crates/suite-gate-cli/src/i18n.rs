// crates/suite-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Suite Gate CLI stores user-facing strings in a small translation
//! catalog to enforce consistent messaging and to prepare for future locales.
//! All runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself to avoid panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"suite"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries loaded into the message bundle.
pub(crate) const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "suite-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.serialize_failed", "Failed to serialize output: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.build_failed", "Invalid configuration: {error}"),
    ("config.validate.ok", "Config valid ({suites} suites)."),
    ("config.validate.graph_failed", "Suite graph is invalid: {error}"),
    ("suites.list.empty", "No suites configured."),
    ("suites.list.line", "{suite}  ({members} members){gate}"),
    ("suites.list.gate", "  requires {capability}"),
    ("plan.failed", "Failed to plan suite {suite}: {error}"),
    (
        "plan.header",
        "Plan for {suite}: {total} leaves, {runnable} runnable (plan hash {hash})",
    ),
    ("plan.hash.unavailable", "unavailable"),
    ("plan.entry.runnable", "  {leaf}  [{path}]  run"),
    ("plan.entry.skipped", "  {leaf}  [{path}]  skip: {reason}"),
    ("plan.entry.blocked", "  {leaf}  [{path}]  blocked: {capability} probe failed: {detail}"),
    ("plan.probe.line", "  probe {capability} (via {suite}): {status}"),
    ("plan.probes.header", "Capability probes:"),
    ("probe.status.supported", "supported"),
    ("probe.status.unsupported", "unsupported"),
    ("probe.status.failed", "failed ({detail})"),
    (
        "run.executor_missing",
        "No [executor] is configured; add one to run leaves.",
    ),
    ("run.report_file_failed", "Failed to open report file {path}: {error}"),
    ("run.leaf.passed", "{leaf} ... passed"),
    ("run.leaf.failed", "{leaf} ... FAILED: {detail}"),
    ("run.leaf.errored", "{leaf} ... ERROR: {detail}"),
    ("run.leaf.skipped", "{leaf} ... skipped: {reason}"),
    (
        "run.leaf.precondition_error",
        "{leaf} ... PRECONDITION ERROR ({capability}): {detail}",
    ),
    ("run.leaf.not_run", "{leaf} ... not run"),
    (
        "run.summary",
        "{suite}: {passed} passed, {failed} failed, {errored} errored, {skipped} skipped, \
         {precondition_errors} precondition errors, {not_run} not run",
    ),
    ("run.aborted", "Run aborted at {leaf}: {detail}"),
];

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the English catalog while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static English catalog used by the CLI.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
