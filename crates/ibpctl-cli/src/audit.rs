// crates/ibpctl-cli/src/audit.rs
// ============================================================================
// Module: CLI Audit Sinks
// Description: JSON-line audit sinks for dispatcher events.
// Purpose: Persist gateway call outcomes and invocation verdicts.
// Dependencies: ibpctl-core, serde_json
// ============================================================================

//! ## Overview
//! The dispatcher reports every gateway call and the final verdict through an
//! [`AuditSink`]. These sinks serialize each event as one JSON line, either to
//! stderr or to an append-only file. Write failures are swallowed; auditing
//! never changes the outcome of an invocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use ibpctl_core::AuditEvent;
use ibpctl_core::AuditSink;
use ibpctl_core::NoopAuditSink;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Path value that selects the stderr sink.
pub const STDERR_PATH: &str = "-";

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

// ============================================================================
// SECTION: Selection
// ============================================================================

/// Builds the sink named by `--audit-log`.
///
/// `None` selects the no-op sink and [`STDERR_PATH`] selects stderr; any other
/// value is opened as an append-only file.
///
/// # Errors
///
/// Returns an error if the audit file cannot be opened.
pub fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn AuditSink>> {
    match path {
        None => Ok(Box::new(NoopAuditSink)),
        Some(path) if path.as_os_str() == STDERR_PATH => Ok(Box::new(StderrAuditSink)),
        Some(path) => Ok(Box::new(FileAuditSink::new(path)?)),
    }
}
