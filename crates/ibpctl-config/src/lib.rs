// crates/ibpctl-config/src/lib.rs
// ============================================================================
// Module: ibpctl Config Library
// Description: Network profile model and validation.
// Purpose: Single source of truth for network profile semantics.
// Dependencies: ibpctl-core, serde, serde_yaml, url
// ============================================================================

//! ## Overview
//! `ibpctl-config` defines the network profile named by `--config`. Profiles
//! are YAML (JSON is accepted as a YAML subset) and validated fail-closed
//! before any gateway talks to the network.
//!
//! Security posture: profiles carry enrollment secrets and API keys and are
//! treated as untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod profile;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use profile::*;
