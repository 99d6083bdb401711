// crates/suite-gate-cli/src/lib.rs
// ============================================================================
// Module: Suite Gate CLI Library
// Description: Shared helpers for the Suite Gate command-line interface.
// Purpose: Provide reusable components (i18n, rendering) for the CLI binary and tests.
// Dependencies: suite-gate-core
// ============================================================================

//! ## Overview
//! This library houses shared CLI utilities: the message catalog and the
//! text renderers for plans, reports, and suite listings. The binary entry
//! point (`src/main.rs`) imports these helpers to keep all user-facing output
//! consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Human-readable rendering of plans and reports.
pub mod render;
