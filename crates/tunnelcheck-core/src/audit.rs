// crates/tunnelcheck-core/src/audit.rs
// ============================================================================
// Module: Validation Audit Logging
// Description: Redacted audit events for validation calls.
// Purpose: Record verdicts without ever recording the validated content.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Validation inputs carry private keys, so audit events describe only the
//! shape of a call: which path ran, the verdict, the error count, and the
//! input size. Error strings are withheld because they may quote input
//! entries. Sinks are small so deployments can route events wherever they
//! like.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::result::ValidationResult;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Validation path that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Raw `[Interface]` / `[Peer]` text.
    Text,
    /// Structured field record.
    Form,
}

/// Audit event payload for one validation call.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Validation path.
    pub source: InputSource,
    /// Validation verdict.
    pub valid: bool,
    /// Number of errors reported.
    pub error_count: usize,
    /// Size of the validated input in bytes.
    pub input_bytes: usize,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

impl ValidationAuditEvent {
    /// Creates an event for `result` with a consistent timestamp.
    #[must_use]
    pub fn new(source: InputSource, input_bytes: usize, result: &ValidationResult) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "config_validation",
            timestamp_ms,
            source,
            valid: result.is_valid(),
            error_count: result.errors().len(),
            input_bytes,
            redaction: "content_withheld",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for validation events.
pub trait ValidationAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ValidationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ValidationAuditSink for StderrAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
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

impl ValidationAuditSink for FileAuditSink {
    fn record(&self, event: &ValidationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ValidationAuditSink for NoopAuditSink {
    fn record(&self, _event: &ValidationAuditEvent) {}
}
