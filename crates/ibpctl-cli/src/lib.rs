// crates/ibpctl-cli/src/lib.rs
// ============================================================================
// Module: ibpctl CLI Library
// Description: Shared helpers for the ibpctl command-line interface.
// Purpose: Provide reusable components (i18n, audit sinks) for the binary and tests.
// Dependencies: ibpctl-core, serde_json
// ============================================================================

//! ## Overview
//! This library houses the CLI utilities shared by the `ibpctl` binary and its
//! tests: the internationalized message catalog and the audit sinks selected
//! with `--audit-log`. The binary entry point (`src/main.rs`) imports these
//! helpers to keep all user-facing output consistent.
//!
//! Security posture: CLI inputs are untrusted and must be validated before any
//! network interaction.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// JSON-line audit sinks.
pub mod audit;
/// Internationalization helpers and message catalog.
pub mod i18n;
