// crates/partita-server/src/audit.rs
// ============================================================================
// Module: API Audit Logging
// Description: Structured audit events for API request handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines audit event payloads and sinks for API request logging.
//! Events never carry authentication tokens; failures record only the action,
//! the resolved account, and the wire error code. It is intentionally
//! lightweight so deployments can route events to their preferred logging
//! pipeline without redesign.

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

use crate::telemetry::ApiOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// API audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ApiAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// Requested action name when the request named one.
    pub action: Option<String>,
    /// Authenticated account id when credentials resolved.
    pub user: Option<u64>,
    /// Request outcome.
    pub outcome: ApiOutcome,
    /// Wire error code when present.
    pub error_code: Option<u32>,
    /// Failure detail withheld from the wire response.
    pub detail: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs required to construct an audit event.
pub struct ApiAuditEventParams {
    /// Peer IP address if known.
    pub peer_ip: Option<String>,
    /// Requested action name when the request named one.
    pub action: Option<String>,
    /// Authenticated account id when credentials resolved.
    pub user: Option<u64>,
    /// Request outcome.
    pub outcome: ApiOutcome,
    /// Wire error code when present.
    pub error_code: Option<u32>,
    /// Failure detail withheld from the wire response.
    pub detail: Option<String>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl ApiAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ApiAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "api_request",
            timestamp_ms,
            peer_ip: params.peer_ip,
            action: params.action,
            user: params.user,
            outcome: params.outcome,
            error_code: params.error_code,
            detail: params.detail,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for API request events.
pub trait ApiAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ApiAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ApiAuditSink for StderrAuditSink {
    fn record(&self, event: &ApiAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
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

impl ApiAuditSink for FileAuditSink {
    fn record(&self, event: &ApiAuditEvent) {
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

impl ApiAuditSink for NoopAuditSink {
    fn record(&self, _event: &ApiAuditEvent) {}
}

/// In-memory audit sink for tests and local inspection.
///
/// # Invariants
/// - Events are appended in arrival order; a poisoned lock drops the event.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded audit events.
    events: Mutex<Vec<ApiAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ApiAuditEvent> {
        self.events.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl ApiAuditSink for MemoryAuditSink {
    fn record(&self, event: &ApiAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
