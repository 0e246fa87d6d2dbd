// crates/ibpctl-core/src/runtime/mod.rs
// ============================================================================
// Module: ibpctl Runtime
// Description: Invocation dispatch, the admin-cert step sequence, and fakes.
// Purpose: Drive one CLI invocation against a network gateway.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime runs each invocation as a single synchronous pipeline:
//! usage checks, spec gate, session setup, then the per-verb protocol. Every
//! failure is returned as a [`DispatchError`] that maps to an exit code; the
//! dispatcher never retries.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod admin_cert;
pub mod dispatcher;
pub mod scripted;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use admin_cert::AdminCertReport;
pub use admin_cert::AdminStep;
pub use admin_cert::StepCause;
pub use admin_cert::StepFailure;
pub use admin_cert::install_admin_cert;
pub use dispatcher::DispatchError;
pub use dispatcher::DispatchOutcome;
pub use dispatcher::ExitStatus;
pub use dispatcher::Invocation;
pub use dispatcher::MAX_PROFILE_BYTES;
pub use dispatcher::OperationDispatcher;
pub use dispatcher::UsageError;
pub use scripted::GatewayCall;
pub use scripted::ScriptedGateway;
pub use scripted::ScriptedSession;
