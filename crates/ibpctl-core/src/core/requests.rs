// crates/ibpctl-core/src/core/requests.rs
// ============================================================================
// Module: Operation Requests
// Description: Strongly-typed requests derived from spec documents.
// Purpose: Build per-verb request values from the shared field table.
// Dependencies: crate::core::{fields, spec}
// ============================================================================

//! ## Overview
//! Requests are short-lived values built once from a [`SpecDocument`] and
//! handed to the gateway. Every field defaults to empty when absent; nothing
//! here fails. The gateway rejects empty or invalid values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::fields;
use crate::core::spec::SpecDocument;

// ============================================================================
// SECTION: Chaincode Requests
// ============================================================================

/// Chaincode install request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRequest {
    /// Chaincode identifier.
    pub cc_id: String,
    /// Chaincode version.
    pub version: String,
    /// Go workspace path.
    pub go_path: String,
    /// Chaincode source root path.
    pub cc_src_root_path: String,
    /// Collections config path (empty for none).
    pub collections_config: String,
}

impl InstallRequest {
    /// Builds an install request from a spec document.
    #[must_use]
    pub fn from_spec(spec: &SpecDocument) -> Self {
        Self {
            cc_id: spec.text(&fields::CC_ID),
            version: spec.text(&fields::VERSION),
            go_path: spec.text(&fields::GO_PATH),
            cc_src_root_path: spec.text(&fields::CC_SRC_ROOT_PATH),
            collections_config: spec.text(&fields::COLLECTIONS_CONFIG),
        }
    }
}

/// Chaincode instantiate or upgrade request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployRequest {
    /// Chaincode identifier.
    pub cc_id: String,
    /// Chaincode version.
    pub version: String,
    /// Chaincode source root path.
    pub cc_src_root_path: String,
    /// Target channel.
    pub channel: String,
    /// Endorsement policy expression.
    pub cc_policy: String,
    /// Init arguments in spec order.
    pub init_params: Vec<Vec<u8>>,
    /// Collections config path (empty for none).
    pub collections_config: String,
}

impl DeployRequest {
    /// Builds an instantiate/upgrade request from a spec document.
    #[must_use]
    pub fn from_spec(spec: &SpecDocument) -> Self {
        Self {
            cc_id: spec.text(&fields::CC_ID),
            version: spec.text(&fields::VERSION),
            cc_src_root_path: spec.text(&fields::CC_SRC_ROOT_PATH),
            channel: spec.text(&fields::CHANNEL),
            cc_policy: spec.text(&fields::CC_POLICY),
            init_params: spec.byte_list(&fields::INIT_PARAMS),
            collections_config: spec.text(&fields::COLLECTIONS_CONFIG),
        }
    }
}

/// Chaincode lifecycle request, one variant per chaincode verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaincodeRequest {
    /// `cc-deploy`: package and install.
    Install(InstallRequest),
    /// `cc-instantiate`: instantiate on a channel.
    Instantiate(DeployRequest),
    /// `cc-upgrade`: upgrade on a channel.
    Upgrade(DeployRequest),
}

impl ChaincodeRequest {
    /// Returns the chaincode identifier.
    #[must_use]
    pub fn cc_id(&self) -> &str {
        match self {
            Self::Install(request) => &request.cc_id,
            Self::Instantiate(request) | Self::Upgrade(request) => &request.cc_id,
        }
    }

    /// Returns the chaincode version.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::Install(request) => &request.version,
            Self::Instantiate(request) | Self::Upgrade(request) => &request.version,
        }
    }
}

// ============================================================================
// SECTION: Admin Cert Request
// ============================================================================

/// Admin certificate installation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminCertRequest {
    /// Organization MSP identifier.
    pub org_msp: String,
    /// Unique certificate name.
    pub admin_cert_name: String,
    /// Peer to restart.
    pub peer_id: String,
    /// PEM certificate path.
    pub cert_file_path: String,
    /// PEM private key path.
    pub key_file_path: String,
    /// Channel to sync after the restart.
    pub channel: String,
}

impl AdminCertRequest {
    /// Builds an admin-cert request from a spec document.
    #[must_use]
    pub fn from_spec(spec: &SpecDocument) -> Self {
        Self {
            org_msp: spec.text(&fields::ORG_MSP),
            admin_cert_name: spec.text(&fields::ADMIN_CERT_NAME),
            peer_id: spec.text(&fields::PEER_ID),
            cert_file_path: spec.text(&fields::CERT_FILE_PATH),
            key_file_path: spec.text(&fields::KEY_FILE_PATH),
            channel: spec.text(&fields::CHANNEL),
        }
    }
}
