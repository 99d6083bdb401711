// crates/suite-gate-cli/src/render.rs
// ============================================================================
// Module: CLI Rendering
// Description: Human-readable rendering of suites, plans, and run reports.
// Purpose: Keep text output formats in one place for the binary and tests.
// Dependencies: suite-gate-core, crate::i18n
// ============================================================================

//! ## Overview
//! Renderers turn core values into output lines. They never write to a stream;
//! the binary decides where lines go. All text is routed through the message
//! catalog.

// ============================================================================
// SECTION: Imports
// ============================================================================

use suite_gate_core::EntryGate;
use suite_gate_core::LeafOutcome;
use suite_gate_core::LeafRecord;
use suite_gate_core::PlanEntry;
use suite_gate_core::Precondition;
use suite_gate_core::ProbeStatus;
use suite_gate_core::ResolvedPlan;
use suite_gate_core::RunReport;
use suite_gate_core::RunStatus;
use suite_gate_core::SuiteName;

use crate::t;

// ============================================================================
// SECTION: Suites
// ============================================================================

/// Listing row for one configured suite.
#[derive(Debug, Clone, Copy)]
pub struct SuiteListing<'a> {
    /// Suite name.
    pub name: &'a SuiteName,
    /// Number of direct members.
    pub members: usize,
    /// Optional precondition.
    pub precondition: Option<&'a Precondition>,
}

/// Renders the suite listing, one line per suite.
#[must_use]
pub fn render_suite_list(suites: &[SuiteListing<'_>]) -> Vec<String> {
    if suites.is_empty() {
        return vec![t!("suites.list.empty")];
    }
    suites
        .iter()
        .map(|suite| {
            let gate = suite
                .precondition
                .map(|precondition| t!("suites.list.gate", capability = precondition.capability))
                .unwrap_or_default();
            t!("suites.list.line", suite = suite.name, members = suite.members, gate = gate)
        })
        .collect()
}

// ============================================================================
// SECTION: Plans
// ============================================================================

/// Renders a resolved plan: header, probe observations, then entries.
#[must_use]
pub fn render_plan(plan: &ResolvedPlan) -> Vec<String> {
    let hash = plan
        .fingerprint()
        .map_or_else(|_| t!("plan.hash.unavailable"), |fingerprint| fingerprint.to_string());
    let mut lines = vec![t!(
        "plan.header",
        suite = plan.suite,
        total = plan.len(),
        runnable = plan.runnable_count(),
        hash = hash
    )];
    if !plan.probes.is_empty() {
        lines.push(t!("plan.probes.header"));
        for probe in &plan.probes {
            lines.push(t!(
                "plan.probe.line",
                capability = probe.capability,
                suite = probe.suite,
                status = render_probe_status(&probe.status)
            ));
        }
    }
    lines.extend(plan.entries.iter().map(render_entry));
    lines
}

/// Renders one plan entry.
fn render_entry(entry: &PlanEntry) -> String {
    let path = render_suite_path(&entry.suite_path);
    match &entry.gate {
        EntryGate::Runnable => t!("plan.entry.runnable", leaf = entry.leaf_id, path = path),
        EntryGate::Skipped {
            reason, ..
        } => t!("plan.entry.skipped", leaf = entry.leaf_id, path = path, reason = reason),
        EntryGate::Blocked {
            capability,
            detail,
            ..
        } => t!(
            "plan.entry.blocked",
            leaf = entry.leaf_id,
            path = path,
            capability = capability,
            detail = detail
        ),
    }
}

/// Joins a suite path outermost first.
#[must_use]
pub fn render_suite_path(path: &[SuiteName]) -> String {
    path.iter().map(SuiteName::as_str).collect::<Vec<_>>().join(" > ")
}

/// Renders a probe status label.
fn render_probe_status(status: &ProbeStatus) -> String {
    match status {
        ProbeStatus::Supported => t!("probe.status.supported"),
        ProbeStatus::Unsupported => t!("probe.status.unsupported"),
        ProbeStatus::Failed {
            detail,
        } => t!("probe.status.failed", detail = detail),
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Renders a run report: per-leaf lines, the summary, then the abort notice.
#[must_use]
pub fn render_report(report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report.records.iter().map(render_record).collect();
    let summary = &report.summary;
    lines.push(t!(
        "run.summary",
        suite = report.suite,
        passed = summary.passed,
        failed = summary.failed,
        errored = summary.errored,
        skipped = summary.skipped,
        precondition_errors = summary.precondition_errors,
        not_run = summary.not_run
    ));
    if let RunStatus::Aborted {
        leaf_id,
        detail,
    } = &report.status
    {
        lines.push(t!("run.aborted", leaf = leaf_id, detail = detail));
    }
    lines
}

/// Renders one leaf record.
fn render_record(record: &LeafRecord) -> String {
    let leaf = &record.leaf_id;
    match &record.outcome {
        LeafOutcome::Passed => t!("run.leaf.passed", leaf = leaf),
        LeafOutcome::Failed {
            detail,
        } => t!("run.leaf.failed", leaf = leaf, detail = detail),
        LeafOutcome::Errored {
            detail,
        } => t!("run.leaf.errored", leaf = leaf, detail = detail),
        LeafOutcome::Skipped {
            reason,
        } => t!("run.leaf.skipped", leaf = leaf, reason = reason),
        LeafOutcome::PreconditionError {
            capability,
            detail,
        } => t!("run.leaf.precondition_error", leaf = leaf, capability = capability, detail = detail),
        LeafOutcome::NotRun => t!("run.leaf.not_run", leaf = leaf),
    }
}
