// crates/ibpctl-core/src/core/spec.rs
// ============================================================================
// Module: Spec Documents
// Description: Loading and permissive field extraction for JSON spec files.
// Purpose: Turn a spec file into a read-only key/value document.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`SpecDocument`] is a flat JSON object loaded verbatim from disk. No
//! schema is enforced at load time; loading fails only when the file cannot be
//! read, exceeds [`MAX_SPEC_BYTES`], or is not a well-formed JSON object.
//!
//! Field extraction is total: [`as_string`] and [`as_byte_list`] never fail,
//! and absent or wrong-typed values become empty values. Downstream gateway
//! calls are responsible for rejecting requests that end up empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::fields::SpecField;
use crate::core::files::ReadLimitError;
use crate::core::files::read_bytes_with_limit;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a spec document in bytes.
pub const MAX_SPEC_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Spec loading failures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The verb needs a spec but no `--spec` path was given.
    #[error("no spec file provided")]
    Missing,
    /// The spec file could not be read.
    #[error("failed to read spec file {}: {error}", path.display())]
    Read {
        /// Spec file path.
        path: PathBuf,
        /// Underlying read failure.
        error: ReadLimitError,
    },
    /// The spec file is not valid JSON.
    #[error("spec file {} is not valid JSON: {error}", path.display())]
    Parse {
        /// Spec file path.
        path: PathBuf,
        /// Parser error message.
        error: String,
    },
    /// The spec file is JSON but not an object.
    #[error("spec file {} must contain a JSON object", path.display())]
    NotObject {
        /// Spec file path.
        path: PathBuf,
    },
}

// ============================================================================
// SECTION: Spec Document
// ============================================================================

/// Read-only key/value view of a loaded spec file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    /// Top-level fields in document order.
    fields: Map<String, Value>,
}

impl SpecDocument {
    /// Loads a spec document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when no path is given, the file is unreadable or
    /// oversized, or its contents are not a JSON object.
    pub fn load(path: Option<&Path>) -> Result<Self, SpecError> {
        let path = path.ok_or(SpecError::Missing)?;
        let bytes = read_bytes_with_limit(path, MAX_SPEC_BYTES).map_err(|error| SpecError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_slice(&bytes).map_err(|err| match err {
            ParseFailure::Json(error) => SpecError::Parse {
                path: path.to_path_buf(),
                error,
            },
            ParseFailure::NotObject => SpecError::NotObject {
                path: path.to_path_buf(),
            },
        })
    }

    /// Parses a spec document from raw bytes.
    fn from_slice(bytes: &[u8]) -> Result<Self, ParseFailure> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| ParseFailure::Json(err.to_string()))?;
        match value {
            Value::Object(fields) => Ok(Self {
                fields,
            }),
            _ => Err(ParseFailure::NotObject),
        }
    }

    /// Builds a document from an in-memory JSON object.
    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self {
            fields,
        }
    }

    /// Returns the raw value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Extracts a string field, defaulting to empty.
    #[must_use]
    pub fn text(&self, field: &SpecField) -> String {
        as_string(self.get(field.name))
    }

    /// Extracts a list field as byte strings, defaulting to empty.
    #[must_use]
    pub fn byte_list(&self, field: &SpecField) -> Vec<Vec<u8>> {
        as_byte_list(self.get(field.name))
    }
}

/// Parse failure detail before the path is attached.
enum ParseFailure {
    /// Malformed JSON.
    Json(String),
    /// Well-formed JSON that is not an object.
    NotObject,
}

// ============================================================================
// SECTION: Field Extraction
// ============================================================================

/// Returns the value if it is a string, otherwise an empty string.
#[must_use]
pub fn as_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        _ => String::new(),
    }
}

/// Converts a list value into byte strings in original order.
///
/// Non-string elements become empty byte strings; a non-list value yields an
/// empty sequence.
#[must_use]
pub fn as_byte_list(value: Option<&Value>) -> Vec<Vec<u8>> {
    match value {
        Some(Value::Array(items)) => {
            items.iter().map(|item| as_string(Some(item)).into_bytes()).collect()
        }
        _ => Vec::new(),
    }
}
