// crates/ibpctl-core/src/core/fields.rs
// ============================================================================
// Module: Spec Field Table
// Description: Canonical names and examples for every spec document field.
// Purpose: Keep request extraction and spec templates in lock-step.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each spec field is declared exactly once here. Request builders read
//! fields through these constants and [`generate_template`] renders the same
//! constants, so a field added to one side is automatically on the other.
//!
//! ## Invariants
//! - Field names are unique across [`SPEC_FIELDS`].
//! - Every field belongs to at least one [`SpecShape`].
//! - Examples are non-empty so a rendered template round-trips into a fully
//!   populated request.
//!
//! [`generate_template`]: crate::core::catalog::generate_template

// ============================================================================
// SECTION: Types
// ============================================================================

/// Spec document shapes; each verb that takes a spec reads one shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpecShape {
    /// Chaincode install, instantiate, and upgrade.
    Chaincode,
    /// Admin certificate installation.
    AdminCert,
    /// Chaincode query (reserved).
    Query,
    /// Chaincode invoke (reserved).
    Invoke,
}

impl SpecShape {
    /// Returns the informational `description` value rendered into templates.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Chaincode => "Install/Instantiate/Upgrade Chain Code",
            Self::AdminCert => "Admin cert install specification",
            Self::Query => "Chain code query specification",
            Self::Invoke => "Chain code invoke specification",
        }
    }
}

/// Value type and template example for a spec field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single string value.
    Text {
        /// Example rendered into templates.
        example: &'static str,
    },
    /// Ordered list of strings, forwarded as byte strings.
    TextList {
        /// Example entries rendered into templates.
        example: &'static [&'static str],
    },
}

/// A single spec document field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpecField {
    /// JSON key in the spec document.
    pub name: &'static str,
    /// Value type and template example.
    pub kind: FieldKind,
    /// Shapes that read this field.
    pub shapes: &'static [SpecShape],
}

impl SpecField {
    /// Returns true when the field belongs to `shape`.
    #[must_use]
    pub fn in_shape(&self, shape: SpecShape) -> bool {
        self.shapes.contains(&shape)
    }
}

// ============================================================================
// SECTION: Chaincode Fields
// ============================================================================

/// Chaincode identifier.
pub const CC_ID: SpecField = SpecField {
    name: "ccID",
    kind: FieldKind::Text {
        example: "<ccID>",
    },
    shapes: &[SpecShape::Chaincode],
};

/// Chaincode version.
pub const VERSION: SpecField = SpecField {
    name: "version",
    kind: FieldKind::Text {
        example: "<ccVersion>",
    },
    shapes: &[SpecShape::Chaincode],
};

/// Channel name; chaincode instantiate/upgrade and the admin-cert sync step.
pub const CHANNEL: SpecField = SpecField {
    name: "channel",
    kind: FieldKind::Text {
        example: "<channelName>",
    },
    shapes: &[SpecShape::Chaincode, SpecShape::AdminCert],
};

/// Go workspace path (install only).
pub const GO_PATH: SpecField = SpecField {
    name: "goPath",
    kind: FieldKind::Text {
        example: "<goPath>",
    },
    shapes: &[SpecShape::Chaincode],
};

/// Chaincode source root path.
pub const CC_SRC_ROOT_PATH: SpecField = SpecField {
    name: "ccSrcRootPath",
    kind: FieldKind::Text {
        example: "<ccSrcRootPath>",
    },
    shapes: &[SpecShape::Chaincode],
};

/// Init arguments passed to instantiate/upgrade.
pub const INIT_PARAMS: SpecField = SpecField {
    name: "initParams",
    kind: FieldKind::TextList {
        example: &["param1", "param2"],
    },
    shapes: &[SpecShape::Chaincode],
};

/// Endorsement policy expression.
pub const CC_POLICY: SpecField = SpecField {
    name: "ccPolicy",
    kind: FieldKind::Text {
        example: "<ccPolicy>",
    },
    shapes: &[SpecShape::Chaincode],
};

/// Optional private data collections config path.
pub const COLLECTIONS_CONFIG: SpecField = SpecField {
    name: "collectionsConfig",
    kind: FieldKind::Text {
        example: "<collectionsConfigPath>",
    },
    shapes: &[SpecShape::Chaincode],
};

// ============================================================================
// SECTION: Admin Cert Fields
// ============================================================================

/// Organization MSP identifier.
pub const ORG_MSP: SpecField = SpecField {
    name: "orgMSP",
    kind: FieldKind::Text {
        example: "<orgMSP>",
    },
    shapes: &[SpecShape::AdminCert],
};

/// Unique name for the admin certificate.
pub const ADMIN_CERT_NAME: SpecField = SpecField {
    name: "adminCertName",
    kind: FieldKind::Text {
        example: "<unique-cert-name>",
    },
    shapes: &[SpecShape::AdminCert],
};

/// Peer restarted to pick up the certificate.
pub const PEER_ID: SpecField = SpecField {
    name: "peerID",
    kind: FieldKind::Text {
        example: "<peerID>",
    },
    shapes: &[SpecShape::AdminCert],
};

/// PEM certificate path.
pub const CERT_FILE_PATH: SpecField = SpecField {
    name: "certFilePath",
    kind: FieldKind::Text {
        example: "<certFilePath>",
    },
    shapes: &[SpecShape::AdminCert],
};

/// PEM private key path.
pub const KEY_FILE_PATH: SpecField = SpecField {
    name: "keyFilePath",
    kind: FieldKind::Text {
        example: "<keyFilePath>",
    },
    shapes: &[SpecShape::AdminCert],
};

// ============================================================================
// SECTION: Table
// ============================================================================

/// All spec fields in template order.
pub const SPEC_FIELDS: &[SpecField] = &[
    CC_ID,
    VERSION,
    CHANNEL,
    GO_PATH,
    CC_SRC_ROOT_PATH,
    INIT_PARAMS,
    CC_POLICY,
    COLLECTIONS_CONFIG,
    ORG_MSP,
    ADMIN_CERT_NAME,
    PEER_ID,
    CERT_FILE_PATH,
    KEY_FILE_PATH,
];
