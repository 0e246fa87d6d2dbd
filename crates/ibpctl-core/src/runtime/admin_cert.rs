// crates/ibpctl-core/src/runtime/admin_cert.rs
// ============================================================================
// Module: Admin Certificate Installation
// Description: Ordered, non-transactional admin-cert step sequence.
// Purpose: Report exactly which steps took effect and which step failed.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Installing an admin certificate is a short saga with no compensation:
//! add the certificate, stop the peer, start the peer, sync the channel, and
//! record the certificate/key wallet entry. Each step depends on network
//! state left by the previous one, so the steps run strictly in order.
//!
//! ## Invariants
//! - Steps run in [`AdminStep::ORDER`].
//! - The sequence stops at the first rejected or failed step.
//! - Completed steps are never rolled back; the report lists them so the
//!   operator knows what already took effect.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::AdminCertRequest;
use crate::interfaces::GatewayError;
use crate::interfaces::GatewayOp;
use crate::interfaces::NetworkGateway;

// ============================================================================
// SECTION: Steps
// ============================================================================

/// Named admin-cert installation steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdminStep {
    /// Upload the certificate to the organization MSP.
    AddCert,
    /// Stop the peer.
    StopPeer,
    /// Start the peer with the new certificate.
    StartPeer,
    /// Sync the channel.
    SyncChannel,
    /// Record the certificate/key wallet entry.
    GenerateKeyEntry,
}

impl AdminStep {
    /// Execution order.
    pub const ORDER: [Self; 5] =
        [Self::AddCert, Self::StopPeer, Self::StartPeer, Self::SyncChannel, Self::GenerateKeyEntry];

    /// Returns the gateway operation this step performs.
    #[must_use]
    pub const fn operation(self) -> GatewayOp {
        match self {
            Self::AddCert => GatewayOp::AddAdminCert,
            Self::StopPeer => GatewayOp::StopPeer,
            Self::StartPeer => GatewayOp::StartPeer,
            Self::SyncChannel => GatewayOp::SyncChannel,
            Self::GenerateKeyEntry => GatewayOp::GenerateKeyEntry,
        }
    }
}

impl fmt::Display for AdminStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation().as_str())
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Why a gateway call counted as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCause {
    /// The network returned a bare negative verdict.
    Rejected,
    /// The gateway reported an explicit error.
    Error(String),
}

impl StepCause {
    /// Converts a gateway result into `Ok(())` or the failure cause.
    ///
    /// # Errors
    ///
    /// Returns the cause when the call was rejected or failed.
    pub fn check(result: Result<bool, GatewayError>) -> Result<(), Self> {
        match result {
            Ok(true) => Ok(()),
            Ok(false) => Err(Self::Rejected),
            Err(err) => Err(Self::Error(err.to_string())),
        }
    }
}

impl fmt::Display for StepCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => f.write_str("rejected by the network"),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// The step that stopped the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    /// Failing step.
    pub step: AdminStep,
    /// Failure cause.
    pub cause: StepCause,
}

/// Result of an admin-cert installation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCertReport {
    /// Steps that completed, in execution order.
    pub completed: Vec<AdminStep>,
    /// First failure, if any; later steps were not attempted.
    pub failure: Option<StepFailure>,
}

impl AdminCertReport {
    /// Returns true when every step completed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.completed.len() == AdminStep::ORDER.len()
    }

    /// Returns the failing step, if any.
    #[must_use]
    pub fn failed_step(&self) -> Option<AdminStep> {
        self.failure.as_ref().map(|failure| failure.step)
    }
}

impl fmt::Display for AdminCertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let completed = if self.completed.is_empty() {
            "none".to_string()
        } else {
            self.completed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        match &self.failure {
            Some(failure) => write!(
                f,
                "step {} failed ({}); steps already applied: {completed}",
                failure.step, failure.cause
            ),
            None => write!(f, "steps applied: {completed}"),
        }
    }
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs the admin-cert steps in order, stopping at the first failure.
///
/// `observe` sees every attempted step and its raw result before the report
/// is updated; the dispatcher uses it for audit events.
pub fn install_admin_cert<G, F>(
    gateway: &G,
    session: &G::Session,
    request: &AdminCertRequest,
    mut observe: F,
) -> AdminCertReport
where
    G: NetworkGateway,
    F: FnMut(AdminStep, &Result<bool, GatewayError>),
{
    let mut report = AdminCertReport::default();
    for step in AdminStep::ORDER {
        let result = match step {
            AdminStep::AddCert => gateway.add_admin_cert(session, request),
            AdminStep::StopPeer => gateway.stop_peer(session, &request.peer_id),
            AdminStep::StartPeer => gateway.start_peer(session, &request.peer_id),
            AdminStep::SyncChannel => gateway.sync_channel(session, &request.channel),
            AdminStep::GenerateKeyEntry => gateway.generate_key_entry(session, request),
        };
        observe(step, &result);
        if let Err(cause) = StepCause::check(result) {
            report.failure = Some(StepFailure {
                step,
                cause,
            });
            return report;
        }
        report.completed.push(step);
    }
    report
}
