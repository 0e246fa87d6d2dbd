// crates/ibpctl-core/src/runtime/scripted.rs
// ============================================================================
// Module: Scripted Gateway
// Description: In-memory gateway that records calls and fails on request.
// Purpose: Provide a deterministic gateway for tests and dry runs.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`ScriptedGateway`] accepts every operation unless told otherwise and keeps
//! an ordered log of the calls it saw. Clones share the same log, so a test
//! can hand one clone to the dispatcher and inspect the other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::AdminCertRequest;
use crate::core::DeployRequest;
use crate::core::InstallRequest;
use crate::interfaces::GatewayError;
use crate::interfaces::GatewayOp;
use crate::interfaces::NetworkGateway;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// Session setup with the profile bytes.
    InitializeSession(Vec<u8>),
    /// Admin enrollment.
    EnrollAdmin {
        /// Whether the admin was registered first.
        register: bool,
    },
    /// User enrollment.
    EnrollUser {
        /// User identifier.
        user_id: String,
        /// Enrollment secret.
        secret: String,
        /// Organization.
        org: String,
    },
    /// Chaincode install.
    InstallChaincode(InstallRequest),
    /// Chaincode instantiate.
    InstantiateChaincode(DeployRequest),
    /// Chaincode upgrade.
    UpgradeChaincode(DeployRequest),
    /// Admin certificate upload.
    AddAdminCert(AdminCertRequest),
    /// Peer stop.
    StopPeer(String),
    /// Peer start.
    StartPeer(String),
    /// Channel sync.
    SyncChannel(String),
    /// Wallet entry.
    GenerateKeyEntry(AdminCertRequest),
}

impl GatewayCall {
    /// Returns the operation kind of this call.
    #[must_use]
    pub const fn op(&self) -> GatewayOp {
        match self {
            Self::InitializeSession(_) => GatewayOp::InitializeSession,
            Self::EnrollAdmin {
                ..
            } => GatewayOp::EnrollAdmin,
            Self::EnrollUser {
                ..
            } => GatewayOp::EnrollUser,
            Self::InstallChaincode(_) => GatewayOp::InstallChaincode,
            Self::InstantiateChaincode(_) => GatewayOp::InstantiateChaincode,
            Self::UpgradeChaincode(_) => GatewayOp::UpgradeChaincode,
            Self::AddAdminCert(_) => GatewayOp::AddAdminCert,
            Self::StopPeer(_) => GatewayOp::StopPeer,
            Self::StartPeer(_) => GatewayOp::StartPeer,
            Self::SyncChannel(_) => GatewayOp::SyncChannel,
            Self::GenerateKeyEntry(_) => GatewayOp::GenerateKeyEntry,
        }
    }
}

/// Scripted response for one operation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scripted {
    /// Return `Ok(false)`.
    Reject,
    /// Return a protocol error with this message.
    Fail(String),
}

/// Shared gateway state.
#[derive(Debug, Default)]
struct ScriptState {
    /// Calls in the order received.
    calls: Vec<GatewayCall>,
    /// Scripted responses by operation.
    responses: HashMap<GatewayOp, Scripted>,
}

/// Session handed out by [`ScriptedGateway`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedSession {
    /// Whether the admin identity has been enrolled.
    pub admin_enrolled: bool,
}

/// In-memory gateway that records calls and answers from a script.
#[derive(Debug, Default, Clone)]
pub struct ScriptedGateway {
    /// Call log and scripted responses.
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedGateway {
    /// Creates a gateway that accepts every operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `op` return a bare negative verdict.
    #[must_use]
    pub fn reject(self, op: GatewayOp) -> Self {
        self.script(op, Scripted::Reject)
    }

    /// Makes `op` return an explicit error.
    #[must_use]
    pub fn fail(self, op: GatewayOp, message: impl Into<String>) -> Self {
        self.script(op, Scripted::Fail(message.into()))
    }

    /// Returns a copy of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().map(|state| state.calls.clone()).unwrap_or_default()
    }

    /// Returns the operation kinds of the recorded calls.
    #[must_use]
    pub fn ops(&self) -> Vec<GatewayOp> {
        self.calls().iter().map(GatewayCall::op).collect()
    }

    /// Stores a scripted response.
    fn script(self, op: GatewayOp, response: Scripted) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.responses.insert(op, response);
        }
        self
    }

    /// Records `call` and returns its scripted result.
    fn answer(&self, call: GatewayCall) -> Result<bool, GatewayError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| GatewayError::Protocol("scripted gateway mutex poisoned".to_string()))?;
        let op = call.op();
        state.calls.push(call);
        match state.responses.get(&op) {
            None => Ok(true),
            Some(Scripted::Reject) => Ok(false),
            Some(Scripted::Fail(message)) => Err(GatewayError::Protocol(message.clone())),
        }
    }
}

// ============================================================================
// SECTION: Gateway Implementation
// ============================================================================

impl NetworkGateway for ScriptedGateway {
    type Session = ScriptedSession;

    fn initialize_session(&self, profile: &[u8]) -> Result<Self::Session, GatewayError> {
        if self.answer(GatewayCall::InitializeSession(profile.to_vec()))? {
            Ok(ScriptedSession::default())
        } else {
            Err(GatewayError::Profile("session rejected".to_string()))
        }
    }

    fn enroll_admin(
        &self,
        session: &mut Self::Session,
        register: bool,
    ) -> Result<bool, GatewayError> {
        let accepted = self.answer(GatewayCall::EnrollAdmin {
            register,
        })?;
        session.admin_enrolled = accepted;
        Ok(accepted)
    }

    fn enroll_user(
        &self,
        _session: &Self::Session,
        user_id: &str,
        secret: &str,
        org: &str,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::EnrollUser {
            user_id: user_id.to_string(),
            secret: secret.to_string(),
            org: org.to_string(),
        })
    }

    fn install_chaincode(
        &self,
        _session: &Self::Session,
        request: &InstallRequest,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::InstallChaincode(request.clone()))
    }

    fn instantiate_chaincode(
        &self,
        _session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::InstantiateChaincode(request.clone()))
    }

    fn upgrade_chaincode(
        &self,
        _session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::UpgradeChaincode(request.clone()))
    }

    fn add_admin_cert(
        &self,
        _session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::AddAdminCert(request.clone()))
    }

    fn stop_peer(&self, _session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::StopPeer(peer_id.to_string()))
    }

    fn start_peer(&self, _session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::StartPeer(peer_id.to_string()))
    }

    fn sync_channel(&self, _session: &Self::Session, channel: &str) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::SyncChannel(channel.to_string()))
    }

    fn generate_key_entry(
        &self,
        _session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError> {
        self.answer(GatewayCall::GenerateKeyEntry(request.clone()))
    }
}
