// crates/ibpctl-core/src/core/catalog.rs
// ============================================================================
// Module: Command Catalog
// Description: Static per-verb descriptors and spec template generation.
// Purpose: Decide spec and arity requirements before any work is done.
// Dependencies: serde_json, crate::core::fields
// ============================================================================

//! ## Overview
//! The catalog is an immutable table with exactly one [`CommandDescriptor`]
//! per recognized verb. The dispatcher consults it first: unknown verbs and
//! arity mismatches are rejected before a spec is loaded or the network is
//! touched.
//!
//! Templates are authoring aids rendered from [`SPEC_FIELDS`]; they never
//! affect validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::fields::FieldKind;
use crate::core::fields::SPEC_FIELDS;
use crate::core::fields::SpecShape;

// ============================================================================
// SECTION: Verbs
// ============================================================================

/// Recognized CLI verbs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Bootstrap: initialize and register a new org admin.
    Init,
    /// Enroll a user identity.
    Enroll,
    /// Install chaincode.
    CcDeploy,
    /// Instantiate chaincode.
    CcInstantiate,
    /// Upgrade chaincode.
    CcUpgrade,
    /// Query chaincode (reserved, not implemented).
    CcQuery,
    /// Invoke chaincode (reserved, not implemented).
    CcInvoke,
    /// Install an admin certificate and restart the peer.
    AddAdminCert,
    /// Print a spec template.
    SpecGen,
}

impl Verb {
    /// Returns the CLI spelling of the verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.descriptor().name
    }

    /// Parses a CLI verb.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        describe(value).map(|descriptor| descriptor.verb)
    }

    /// Returns the catalog entry for this verb.
    #[must_use]
    pub const fn descriptor(self) -> &'static CommandDescriptor {
        match self {
            Self::Init => &COMMANDS[0],
            Self::Enroll => &COMMANDS[1],
            Self::CcDeploy => &COMMANDS[2],
            Self::CcInstantiate => &COMMANDS[3],
            Self::CcUpgrade => &COMMANDS[4],
            Self::CcQuery => &COMMANDS[5],
            Self::CcInvoke => &COMMANDS[6],
            Self::AddAdminCert => &COMMANDS[7],
            Self::SpecGen => &COMMANDS[8],
        }
    }
}

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Static metadata for one verb.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Verb this entry describes.
    pub verb: Verb,
    /// CLI spelling.
    pub name: &'static str,
    /// Whether a spec document must load before dispatch.
    pub requires_spec: bool,
    /// Exact number of positional arguments after the verb.
    pub positional_args: usize,
    /// Invocation syntax.
    pub usage: &'static str,
    /// Template rendered by `spec-gen <verb>`.
    pub template: Option<SpecShape>,
}

/// Command catalog, indexed by [`Verb::descriptor`].
pub const COMMANDS: [CommandDescriptor; 9] = [
    CommandDescriptor {
        verb: Verb::Init,
        name: "init",
        requires_spec: false,
        positional_args: 0,
        usage: "--config=<config file path> init",
        template: None,
    },
    CommandDescriptor {
        verb: Verb::Enroll,
        name: "enroll",
        requires_spec: false,
        positional_args: 3,
        usage: "--config=<config file path> enroll <userID> <secret> <org>",
        template: None,
    },
    CommandDescriptor {
        verb: Verb::CcDeploy,
        name: "cc-deploy",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> cc-deploy",
        template: Some(SpecShape::Chaincode),
    },
    CommandDescriptor {
        verb: Verb::CcInstantiate,
        name: "cc-instantiate",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> cc-instantiate",
        template: Some(SpecShape::Chaincode),
    },
    CommandDescriptor {
        verb: Verb::CcUpgrade,
        name: "cc-upgrade",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> cc-upgrade",
        template: Some(SpecShape::Chaincode),
    },
    CommandDescriptor {
        verb: Verb::CcQuery,
        name: "cc-query",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> cc-query",
        template: Some(SpecShape::Query),
    },
    CommandDescriptor {
        verb: Verb::CcInvoke,
        name: "cc-invoke",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> cc-invoke",
        template: Some(SpecShape::Invoke),
    },
    CommandDescriptor {
        verb: Verb::AddAdminCert,
        name: "add-admin-cert",
        requires_spec: true,
        positional_args: 0,
        usage: "--config=<config file path> --spec=<spec file path> add-admin-cert",
        template: Some(SpecShape::AdminCert),
    },
    CommandDescriptor {
        verb: Verb::SpecGen,
        name: "spec-gen",
        requires_spec: false,
        positional_args: 1,
        usage: "--config=<config file path> spec-gen <command>",
        template: None,
    },
];

/// Looks up the descriptor for a CLI verb.
#[must_use]
pub fn describe(verb: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|descriptor| descriptor.name == verb)
}

/// Returns whether `verb` needs a loaded spec document.
#[must_use]
pub const fn requires_spec(verb: Verb) -> bool {
    verb.descriptor().requires_spec
}

// ============================================================================
// SECTION: Templates
// ============================================================================

/// Renders the spec template for a verb.
///
/// Returns `None` for unknown verbs and verbs that take no spec.
#[must_use]
pub fn generate_template(verb: &str) -> Option<String> {
    let shape = describe(verb)?.template?;
    let mut document = Map::new();
    document.insert("description".to_string(), Value::String(shape.description().to_string()));
    for field in SPEC_FIELDS.iter().filter(|field| field.in_shape(shape)) {
        let example = match field.kind {
            FieldKind::Text {
                example,
            } => Value::String(example.to_string()),
            FieldKind::TextList {
                example,
            } => Value::Array(
                example.iter().map(|entry| Value::String((*entry).to_string())).collect(),
            ),
        };
        document.insert(field.name.to_string(), example);
    }
    serde_json::to_string_pretty(&Value::Object(document)).ok()
}
