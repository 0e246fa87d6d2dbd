// crates/ibpctl-core/src/core/files.rs
// ============================================================================
// Module: Bounded File Reads
// Description: Size-limited file reads for spec, config, and key material.
// Purpose: Fail closed on oversized inputs before parsing them.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every file the tool reads is untrusted. [`read_bytes_with_limit`] checks
//! the reported size up front and caps the actual read so a file that grows
//! between the two checks is still rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug, Error)]
pub enum ReadLimitError {
    /// File I/O failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// File size exceeds the configured limit.
    #[error("file is {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Reads
// ============================================================================

/// Reads a file from disk while enforcing a hard size limit.
///
/// # Errors
///
/// Returns [`ReadLimitError`] when the file cannot be read or exceeds `max_bytes`.
pub fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}
