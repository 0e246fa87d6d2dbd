// crates/ibpctl-core/src/core/mod.rs
// ============================================================================
// Module: ibpctl Core Types
// Description: Spec documents, field tables, requests, and the command catalog.
// Purpose: Provide the typed view of CLI verbs and spec documents.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe what each verb needs (the command catalog), how a spec
//! document is loaded and read (spec loader and field extractor), and the
//! strongly-typed requests built from it. Field names live in one table so
//! request builders and spec templates cannot drift apart.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod catalog;
pub mod fields;
pub mod files;
pub mod requests;
pub mod spec;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::COMMANDS;
pub use catalog::CommandDescriptor;
pub use catalog::Verb;
pub use catalog::describe;
pub use catalog::generate_template;
pub use catalog::requires_spec;
pub use fields::FieldKind;
pub use fields::SPEC_FIELDS;
pub use fields::SpecField;
pub use fields::SpecShape;
pub use files::ReadLimitError;
pub use files::read_bytes_with_limit;
pub use requests::AdminCertRequest;
pub use requests::ChaincodeRequest;
pub use requests::DeployRequest;
pub use requests::InstallRequest;
pub use spec::MAX_SPEC_BYTES;
pub use spec::SpecDocument;
pub use spec::SpecError;
pub use spec::as_byte_list;
pub use spec::as_string;
