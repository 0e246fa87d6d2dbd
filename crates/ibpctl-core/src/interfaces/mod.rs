// crates/ibpctl-core/src/interfaces/mod.rs
// ============================================================================
// Module: ibpctl Interfaces
// Description: Network gateway and audit sink contracts.
// Purpose: Define the external surfaces the dispatcher drives.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! The blockchain network is an external collaborator reached only through
//! [`NetworkGateway`]. Each operation returns `Ok(true)` when the network
//! accepted it, `Ok(false)` for a bare rejection, and [`GatewayError`] for an
//! explicit failure. The dispatcher treats both negative forms as failure and
//! keeps the distinction only for diagnostics.
//!
//! Security posture: gateways consume untrusted spec values; they must reject
//! empty or malformed requests explicitly rather than guessing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use thiserror::Error;

use crate::core::AdminCertRequest;
use crate::core::DeployRequest;
use crate::core::InstallRequest;

// ============================================================================
// SECTION: Gateway Errors
// ============================================================================

/// Explicit gateway failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The network profile could not be parsed or is invalid.
    #[error("invalid network profile: {0}")]
    Profile(String),
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// The network answered with a non-success status.
    #[error("network returned status {status}: {body}")]
    Status {
        /// HTTP-style status code.
        status: u16,
        /// Response body, truncated by the gateway.
        body: String,
    },
    /// The network refused the operation and said why.
    #[error("network reported: {0}")]
    Reported(String),
    /// The request or response could not be interpreted.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Local file access failed (certificate or key material).
    #[error("io error: {0}")]
    Io(String),
}

// ============================================================================
// SECTION: Gateway Operations
// ============================================================================

/// Gateway operation kinds, used for diagnostics and call scripting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayOp {
    /// Session setup from the network profile.
    InitializeSession,
    /// Admin identity enrollment.
    EnrollAdmin,
    /// User identity enrollment.
    EnrollUser,
    /// Chaincode install.
    InstallChaincode,
    /// Chaincode instantiate.
    InstantiateChaincode,
    /// Chaincode upgrade.
    UpgradeChaincode,
    /// Admin certificate upload.
    AddAdminCert,
    /// Peer stop.
    StopPeer,
    /// Peer start.
    StartPeer,
    /// Channel sync.
    SyncChannel,
    /// Wallet certificate/key entry.
    GenerateKeyEntry,
}

impl GatewayOp {
    /// Returns the stable label for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitializeSession => "initialize_session",
            Self::EnrollAdmin => "enroll_admin",
            Self::EnrollUser => "enroll_user",
            Self::InstallChaincode => "install_chaincode",
            Self::InstantiateChaincode => "instantiate_chaincode",
            Self::UpgradeChaincode => "upgrade_chaincode",
            Self::AddAdminCert => "add_admin_cert",
            Self::StopPeer => "stop_peer",
            Self::StartPeer => "start_peer",
            Self::SyncChannel => "sync_channel",
            Self::GenerateKeyEntry => "generate_key_entry",
        }
    }
}

// ============================================================================
// SECTION: Network Gateway
// ============================================================================

/// Backend-agnostic blockchain network gateway.
///
/// Implementations own timeouts and retries; the dispatcher calls each
/// operation at most once per invocation.
pub trait NetworkGateway {
    /// Authenticated session state carried between calls.
    type Session;

    /// Builds a session from raw network profile bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the profile is invalid or the network is
    /// unreachable.
    fn initialize_session(&self, profile: &[u8]) -> Result<Self::Session, GatewayError>;

    /// Establishes the organization admin identity, registering it first when
    /// `register` is true.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn enroll_admin(&self, session: &mut Self::Session, register: bool)
    -> Result<bool, GatewayError>;

    /// Enrolls a user identity.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn enroll_user(
        &self,
        session: &Self::Session,
        user_id: &str,
        secret: &str,
        org: &str,
    ) -> Result<bool, GatewayError>;

    /// Installs chaincode on the organization peers.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn install_chaincode(
        &self,
        session: &Self::Session,
        request: &InstallRequest,
    ) -> Result<bool, GatewayError>;

    /// Instantiates chaincode on a channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn instantiate_chaincode(
        &self,
        session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError>;

    /// Upgrades chaincode on a channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn upgrade_chaincode(
        &self,
        session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError>;

    /// Uploads an admin certificate to the organization MSP.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn add_admin_cert(
        &self,
        session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError>;

    /// Stops a peer.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn stop_peer(&self, session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError>;

    /// Starts a peer.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn start_peer(&self, session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError>;

    /// Syncs a channel so the peer picks up new admin certificates.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on explicit network failure.
    fn sync_channel(&self, session: &Self::Session, channel: &str) -> Result<bool, GatewayError>;

    /// Records the certificate/key pair as a wallet entry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when key material cannot be read or the network
    /// fails.
    fn generate_key_entry(
        &self,
        session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError>;
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Outcome of a single gateway call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    /// The network accepted the operation.
    Accepted,
    /// The network returned a bare negative verdict.
    Rejected,
    /// The gateway reported an explicit error.
    Error,
}

impl CallOutcome {
    /// Classifies a gateway result.
    #[must_use]
    pub const fn of<T>(result: &Result<bool, T>) -> Self {
        match result {
            Ok(true) => Self::Accepted,
            Ok(false) => Self::Rejected,
            Err(_) => Self::Error,
        }
    }
}

/// Audit event payload written as one JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Event identifier (`gateway_call` or `invocation_verdict`).
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Verb being dispatched, when known.
    pub verb: Option<String>,
    /// Gateway operation for `gateway_call` events.
    pub operation: Option<GatewayOp>,
    /// Gateway call outcome for `gateway_call` events.
    pub outcome: Option<CallOutcome>,
    /// Process exit code for `invocation_verdict` events.
    pub exit_code: Option<u8>,
    /// Error detail, when any.
    pub detail: Option<String>,
}

impl AuditEvent {
    /// Creates a gateway call event.
    #[must_use]
    pub fn gateway_call(
        verb: &str,
        operation: GatewayOp,
        outcome: CallOutcome,
        detail: Option<String>,
    ) -> Self {
        Self {
            event: "gateway_call",
            timestamp_ms: now_ms(),
            verb: Some(verb.to_string()),
            operation: Some(operation),
            outcome: Some(outcome),
            exit_code: None,
            detail,
        }
    }

    /// Creates the final verdict event for an invocation.
    #[must_use]
    pub fn verdict(verb: Option<&str>, exit_code: u8, detail: Option<String>) -> Self {
        Self {
            event: "invocation_verdict",
            timestamp_ms: now_ms(),
            verb: verb.map(ToString::to_string),
            operation: None,
            outcome: None,
            exit_code: Some(exit_code),
            detail,
        }
    }
}

/// Milliseconds since the Unix epoch, zero if the clock is before it.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Audit sink for invocation events.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &AuditEvent);
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
