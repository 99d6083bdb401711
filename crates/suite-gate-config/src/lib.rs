// crates/suite-gate-config/src/lib.rs
// ============================================================================
// Module: Suite Gate Config Library
// Description: Canonical config model, validation, and runtime builders.
// Purpose: Single source of truth for suite-gate.toml semantics.
// Dependencies: suite-gate-core, suite-gate-providers, serde, toml
// ============================================================================

//! ## Overview
//! `suite-gate-config` defines the canonical configuration model for Suite
//! Gate. It provides strict, fail-closed validation and builders that turn a
//! validated file into the registry, precondition gate, probe registry, and
//! executor used by the runtime.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
