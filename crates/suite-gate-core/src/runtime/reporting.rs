// crates/suite-gate-core/src/runtime/reporting.rs
// ============================================================================
// Module: Suite Gate Reporters
// Description: Structured run event sinks.
// Purpose: Emit JSON-line run events without hard logging dependencies.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! Reporters receive probe observations, per-leaf outcomes, and the final run
//! report. [`JsonLinesReporter`] writes one JSON object per line so events can
//! be routed to any log pipeline; [`RecordingReporter`] keeps events in memory
//! for embedding hosts and tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Stderr;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::CapabilityName;
use crate::core::LeafId;
use crate::core::LeafOutcome;
use crate::core::PlanFingerprint;
use crate::core::ProbeRecord;
use crate::core::ProbeStatus;
use crate::core::RunReport;
use crate::core::RunStatus;
use crate::core::RunSummary;
use crate::core::SuiteName;
use crate::interfaces::Reporter;

// ============================================================================
// SECTION: Event Payloads
// ============================================================================

/// Probe observation event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeEvent<'a> {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Suite whose precondition triggered the probe.
    pub suite: &'a SuiteName,
    /// Capability queried.
    pub capability: &'a CapabilityName,
    /// Observed status.
    pub probe: &'a ProbeStatus,
}

/// Leaf outcome event payload.
#[derive(Debug, Clone, Serialize)]
pub struct LeafEvent<'a> {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Leaf identifier.
    pub leaf_id: &'a LeafId,
    /// Recorded outcome.
    #[serde(flatten)]
    pub outcome: &'a LeafOutcome,
}

/// Run completion event payload.
#[derive(Debug, Clone, Serialize)]
pub struct RunEvent<'a> {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Suite the run was planned from.
    pub suite: &'a SuiteName,
    /// Terminal status.
    pub run: &'a RunStatus,
    /// Plan hash when available.
    pub plan_hash: Option<&'a PlanFingerprint>,
    /// Aggregate counts.
    pub summary: &'a RunSummary,
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: JSON Lines Reporter
// ============================================================================

/// Reporter that writes JSON-line events to a writer.
pub struct JsonLinesReporter<W: Write> {
    /// Output writer guarded for shared use.
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesReporter<W> {
    /// Creates a reporter over an arbitrary writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the reporter and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns an error when the writer mutex was poisoned.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|_| io::Error::other("reporter mutex poisoned"))
    }

    /// Serializes an event and appends it as one line.
    fn emit<T: Serialize>(&self, event: &T) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{payload}");
            let _ = writer.flush();
        }
    }
}

impl JsonLinesReporter<Stderr> {
    /// Creates a reporter that logs JSON lines to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl JsonLinesReporter<File> {
    /// Opens a JSON-lines log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> Reporter for JsonLinesReporter<W> {
    fn record_probe(&self, record: &ProbeRecord) {
        self.emit(&ProbeEvent {
            event: "probe_observed",
            timestamp_ms: now_ms(),
            suite: &record.suite,
            capability: &record.capability,
            probe: &record.status,
        });
    }

    fn record_leaf(&self, leaf_id: &LeafId, outcome: &LeafOutcome) {
        self.emit(&LeafEvent {
            event: "leaf_finished",
            timestamp_ms: now_ms(),
            leaf_id,
            outcome,
        });
    }

    fn record_report(&self, report: &RunReport) {
        self.emit(&RunEvent {
            event: "run_finished",
            timestamp_ms: now_ms(),
            suite: &report.suite,
            run: &report.status,
            plan_hash: report.plan_hash.as_ref(),
            summary: &report.summary,
        });
    }
}

// ============================================================================
// SECTION: Recording Reporter
// ============================================================================

/// Event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    /// Probe observation.
    Probe(ProbeRecord),
    /// Leaf outcome.
    Leaf(LeafId, LeafOutcome),
    /// Final report.
    Report(RunReport),
}

/// Reporter that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Events in arrival order.
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingReporter {
    /// Creates an empty recording reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns recorded leaf outcomes in order.
    #[must_use]
    pub fn leaf_events(&self) -> Vec<(LeafId, LeafOutcome)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::Leaf(leaf_id, outcome) => Some((leaf_id, outcome)),
                RecordedEvent::Probe(_) | RecordedEvent::Report(_) => None,
            })
            .collect()
    }

    /// Appends an event.
    fn push(&self, event: RecordedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Reporter for RecordingReporter {
    fn record_probe(&self, record: &ProbeRecord) {
        self.push(RecordedEvent::Probe(record.clone()));
    }

    fn record_leaf(&self, leaf_id: &LeafId, outcome: &LeafOutcome) {
        self.push(RecordedEvent::Leaf(leaf_id.clone(), outcome.clone()));
    }

    fn record_report(&self, report: &RunReport) {
        self.push(RecordedEvent::Report(report.clone()));
    }
}

// ============================================================================
// SECTION: No-op Reporter
// ============================================================================

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn record_leaf(&self, _leaf_id: &LeafId, _outcome: &LeafOutcome) {}

    fn record_report(&self, _report: &RunReport) {}
}
