// crates/partita-server/src/telemetry.rs
// ============================================================================
// Module: API Telemetry
// Description: Observability hooks for API request handling.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Request counters and latency observations flow through the [`ApiMetrics`]
//! trait, keeping the gateway free of exporter dependencies; deployments wire
//! Prometheus or OpenTelemetry behind it without touching request handling.
//! The bundled sinks either discard events or record them in memory for tests.
//! Security posture: metric labels never carry tokens or payload bytes;
//! see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for API request histograms.
pub const API_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000];

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// API request outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ApiOutcome {
    /// Successful request.
    Ok,
    /// Failed request.
    Error,
}

impl ApiOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// API request metric event payload.
///
/// # Invariants
/// - `action` is the requested action name, or a stable placeholder when the
///   request never named one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMetricEvent {
    /// Requested action name.
    pub action: String,
    /// Request outcome.
    pub outcome: ApiOutcome,
    /// Wire error code when the request failed.
    pub error_code: Option<u32>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for API requests and latencies.
pub trait ApiMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: ApiMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: ApiMetricEvent, latency: Duration);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl ApiMetrics for NoopMetrics {
    fn record_request(&self, _event: ApiMetricEvent) {}

    fn record_latency(&self, _event: ApiMetricEvent, _latency: Duration) {}
}

/// In-memory metrics sink for tests and local inspection.
///
/// # Invariants
/// - Events are appended in arrival order; a poisoned lock drops the event.
#[derive(Default)]
pub struct MemoryMetrics {
    /// Recorded request events.
    requests: Mutex<Vec<ApiMetricEvent>>,
    /// Recorded latency observations.
    latencies: Mutex<Vec<(ApiMetricEvent, Duration)>>,
}

impl MemoryMetrics {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded request events.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiMetricEvent> {
        self.requests.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    /// Returns a snapshot of recorded latency observations.
    #[must_use]
    pub fn latencies(&self) -> Vec<(ApiMetricEvent, Duration)> {
        self.latencies.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl ApiMetrics for MemoryMetrics {
    fn record_request(&self, event: ApiMetricEvent) {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(event);
        }
    }

    fn record_latency(&self, event: ApiMetricEvent, latency: Duration) {
        if let Ok(mut guard) = self.latencies.lock() {
            guard.push((event, latency));
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
