// crates/ibpctl-core/src/lib.rs
// ============================================================================
// Module: ibpctl Core Library
// Description: Public API surface for the ibpctl core.
// Purpose: Expose spec documents, the command catalog, interfaces, and runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! `ibpctl-core` turns a CLI verb plus a loosely-typed JSON spec document into
//! a validated, strongly-typed operation request and drives it against a
//! [`NetworkGateway`]. The network itself is an external collaborator reached
//! only through that interface.
//!
//! Security posture: spec and config files are untrusted input; reads are
//! bounded and every failure maps to a reported status plus exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AuditEvent;
pub use interfaces::AuditSink;
pub use interfaces::CallOutcome;
pub use interfaces::GatewayError;
pub use interfaces::GatewayOp;
pub use interfaces::NetworkGateway;
pub use interfaces::NoopAuditSink;
pub use runtime::AdminCertReport;
pub use runtime::AdminStep;
pub use runtime::DispatchError;
pub use runtime::DispatchOutcome;
pub use runtime::ExitStatus;
pub use runtime::GatewayCall;
pub use runtime::Invocation;
pub use runtime::MAX_PROFILE_BYTES;
pub use runtime::OperationDispatcher;
pub use runtime::ScriptedGateway;
pub use runtime::ScriptedSession;
pub use runtime::StepCause;
pub use runtime::StepFailure;
pub use runtime::UsageError;
pub use runtime::install_admin_cert;
