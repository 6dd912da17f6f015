// crates/partita-server/src/lib.rs
// ============================================================================
// Module: Partita Server Library
// Description: HTTP gateway for the Partita remote API.
// Purpose: Authenticate, dispatch, observe, and answer API requests.
// Dependencies: axum, partita-config, partita-core, partita-output, tokio
// ============================================================================

//! ## Overview
//! Partita Server binds the dispatch core to HTTP: it extracts credentials,
//! resolves them through a config-backed authenticator, merges query and
//! form parameters into one request, and answers every call with a single
//! payload in the configured output format.
//! Invariants:
//! - No request reaches a method handler without an authenticated session.
//! - Authentication failures answer with one fixed envelope; detail goes to
//!   audit only.
//! - Every request records exactly one metric event and one audit record.
//!
//! Security posture: request bodies and authorization headers are size-capped
//! before parsing; see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod server;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::audit::ApiAuditEvent;
pub use crate::audit::ApiAuditEventParams;
pub use crate::audit::ApiAuditSink;
pub use crate::audit::FileAuditSink;
pub use crate::audit::MemoryAuditSink;
pub use crate::audit::NoopAuditSink;
pub use crate::audit::StderrAuditSink;
pub use crate::auth::AUTH_FAILURE_CODE;
pub use crate::auth::AUTH_FAILURE_MESSAGE;
pub use crate::auth::AUTH_PARAM;
pub use crate::auth::StaticAuthenticator;
pub use crate::auth::TokenError;
pub use crate::auth::extract_token;
pub use crate::server::ACTION_PARAM;
pub use crate::server::API_ROUTE;
pub use crate::server::ApiServer;
pub use crate::server::GatewayParts;
pub use crate::server::HEALTH_ROUTE;
pub use crate::server::ServeError;
pub use crate::telemetry::API_LATENCY_BUCKETS_MS;
pub use crate::telemetry::ApiMetricEvent;
pub use crate::telemetry::ApiMetrics;
pub use crate::telemetry::ApiOutcome;
pub use crate::telemetry::MemoryMetrics;
pub use crate::telemetry::NoopMetrics;
