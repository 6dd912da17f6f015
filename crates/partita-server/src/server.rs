// crates/partita-server/src/server.rs
// ============================================================================
// Module: API Gateway Transport
// Description: HTTP transport adapter for API method dispatch.
// Purpose: Authenticate requests, dispatch actions, and answer with envelopes.
// Dependencies: axum, partita-config, partita-core, thiserror, tokio, url
// ============================================================================

//! ## Overview
//! This module binds the dispatch pipeline to HTTP. Every request is
//! authenticated before dispatch, answered with exactly one payload in the
//! configured output format, and recorded once in metrics and audit.
//! Invariants:
//! - Authentication failures answer with the fixed auth envelope; backend
//!   detail reaches the audit record only.
//! - Taxonomy failures answer HTTP 200 with an error envelope; only internal
//!   failures answer HTTP 500.
//! - Body parameters override query parameters on key collision.
//!
//! Security posture: inputs are untrusted and size-capped before parsing;
//! see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::ConnectInfo;
use axum::extract::RawQuery;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;

use partita_config::PartitaConfig;
use partita_core::ApiOutput;
use partita_core::ApiRequest;
use partita_core::Authenticator;
use partita_core::DispatchStatus;
use partita_core::Dispatcher;
use partita_core::ErrorCode;
use partita_core::MethodRegistry;
use partita_core::Parameters;
use partita_core::RegistryWiring;
use partita_core::SessionGatekeeper;

use crate::audit::ApiAuditEvent;
use crate::audit::ApiAuditEventParams;
use crate::audit::ApiAuditSink;
use crate::auth::AUTH_FAILURE_CODE;
use crate::auth::AUTH_FAILURE_MESSAGE;
use crate::auth::StaticAuthenticator;
use crate::auth::extract_token;
use crate::telemetry::ApiMetricEvent;
use crate::telemetry::ApiMetrics;
use crate::telemetry::ApiOutcome;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// HTTP route serving the remote API.
pub const API_ROUTE: &str = "/api";

/// HTTP route answering liveness probes.
pub const HEALTH_ROUTE: &str = "/health";

/// Request parameter naming the requested action.
pub const ACTION_PARAM: &str = "action";

/// Metric label used when the request never named an action.
const UNKNOWN_ACTION_LABEL: &str = "unknown";

// ============================================================================
// SECTION: Gateway Server
// ============================================================================

/// Injected collaborators for gateway construction.
///
/// Repositories, sinks, and the output format are chosen by the caller;
/// the gateway owns only transport concerns.
pub struct GatewayParts {
    /// Repository and policy wiring for method registration.
    pub wiring: RegistryWiring,
    /// Output serializer shared by dispatch and transport envelopes.
    pub output: Arc<dyn ApiOutput>,
    /// Metrics sink.
    pub metrics: Arc<dyn ApiMetrics>,
    /// Audit sink.
    pub audit: Arc<dyn ApiAuditSink>,
}

/// API gateway server instance.
pub struct ApiServer {
    /// Resolved listener address.
    bind: SocketAddr,
    /// Shared request-handling state.
    state: Arc<GatewayState>,
}

impl core::fmt::Debug for ApiServer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiServer").field("bind", &self.bind).finish_non_exhaustive()
    }
}

impl ApiServer {
    /// Builds a gateway from configuration and injected collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the configuration fails validation or
    /// yields no usable credentials.
    pub fn from_parts(config: &PartitaConfig, parts: GatewayParts) -> Result<Self, ServeError> {
        config.validate().map_err(|err| ServeError::Config(err.to_string()))?;
        let bind: SocketAddr = config
            .server
            .bind
            .parse()
            .map_err(|_| ServeError::Config("invalid bind address".to_string()))?;
        let authenticator = StaticAuthenticator::from_config(&config.server.auth);
        if authenticator.is_empty() {
            return Err(ServeError::Config("no usable api credentials".to_string()));
        }
        let registry = MethodRegistry::with_default_methods(parts.wiring);
        let dispatcher = Dispatcher::new(registry, Arc::clone(&parts.output));
        Ok(Self {
            bind,
            state: Arc::new(GatewayState {
                dispatcher,
                authenticator: Arc::new(authenticator),
                output: parts.output,
                metrics: parts.metrics,
                audit: parts.audit,
                max_body_bytes: config.server.max_body_bytes,
            }),
        })
    }

    /// Returns the configured listener address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Builds the axum router for the gateway.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route(API_ROUTE, get(handle_api).post(handle_api))
            .route(HEALTH_ROUTE, get(handle_health))
            .with_state(Arc::clone(&self.state))
    }

    /// Serves API requests over HTTP until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the listener cannot bind or the server
    /// stops unexpectedly.
    pub async fn serve(self) -> Result<(), ServeError> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.bind)
            .await
            .map_err(|_| ServeError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServeError::Transport("http server failed".to_string()))
    }
}

/// Shared gateway state for HTTP handlers.
struct GatewayState {
    /// Method dispatcher.
    dispatcher: Dispatcher,
    /// Credential resolver.
    authenticator: Arc<dyn Authenticator>,
    /// Output serializer for transport-level envelopes.
    output: Arc<dyn ApiOutput>,
    /// Metrics sink.
    metrics: Arc<dyn ApiMetrics>,
    /// Audit sink.
    audit: Arc<dyn ApiAuditSink>,
    /// Maximum allowed request body size.
    max_body_bytes: usize,
}

// ============================================================================
// SECTION: HTTP Handlers
// ============================================================================

/// Handles API requests over HTTP.
async fn handle_api(
    State(state): State<Arc<GatewayState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let auth_header =
        headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()).map(str::to_string);
    let reply = process_request(
        &state,
        Some(peer.ip()),
        auth_header.as_deref(),
        query.as_deref().unwrap_or_default(),
        bytes.as_ref(),
    );
    into_http(reply)
}

/// Answers liveness probes.
async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Converts a gateway reply into an HTTP response.
fn into_http(reply: ApiReply) -> Response {
    let mut response = (reply.status, reply.body).into_response();
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(reply.content_type));
    if reply.challenge {
        response.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    response
}

// ============================================================================
// SECTION: Request Handling
// ============================================================================

/// Finished gateway reply, independent of the HTTP layer.
struct ApiReply {
    /// HTTP status to answer with.
    status: StatusCode,
    /// Content type of the payload.
    content_type: &'static str,
    /// Whether to attach a bearer challenge header.
    challenge: bool,
    /// Serialized payload bytes.
    body: Vec<u8>,
}

/// Facts recorded for metrics and audit after a request completes.
struct RequestRecord {
    /// Requested action name when the request named one.
    action: Option<String>,
    /// Authenticated account id when credentials resolved.
    user: Option<u64>,
    /// Request outcome.
    outcome: ApiOutcome,
    /// Wire error code when the request failed.
    error_code: Option<u32>,
    /// Failure detail withheld from the wire response.
    detail: Option<String>,
}

/// Handles one request and records it in metrics and audit.
fn process_request(
    state: &GatewayState,
    peer_ip: Option<IpAddr>,
    auth_header: Option<&str>,
    query: &str,
    body: &[u8],
) -> ApiReply {
    let started = Instant::now();
    let (reply, record) = evaluate_request(state, auth_header, query, body);
    let event = ApiMetricEvent {
        action: record.action.clone().unwrap_or_else(|| UNKNOWN_ACTION_LABEL.to_string()),
        outcome: record.outcome,
        error_code: record.error_code,
        request_bytes: body.len(),
        response_bytes: reply.body.len(),
    };
    state.metrics.record_request(event.clone());
    state.metrics.record_latency(event, started.elapsed());
    state.audit.record(&ApiAuditEvent::new(ApiAuditEventParams {
        peer_ip: peer_ip.map(|ip| ip.to_string()),
        action: record.action,
        user: record.user,
        outcome: record.outcome,
        error_code: record.error_code,
        detail: record.detail,
        request_bytes: body.len(),
        response_bytes: reply.body.len(),
    }));
    reply
}

/// Runs the authenticate-then-dispatch chain for one request.
fn evaluate_request(
    state: &GatewayState,
    auth_header: Option<&str>,
    query: &str,
    body: &[u8],
) -> (ApiReply, RequestRecord) {
    if body.len() > state.max_body_bytes {
        let payload =
            state.output.error(ErrorCode::RequestParamMissing.as_u32(), "Bad Request: body");
        return (
            ApiReply {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                content_type: state.dispatcher.content_type(),
                challenge: false,
                body: payload.into_bytes(),
            },
            RequestRecord {
                action: None,
                user: None,
                outcome: ApiOutcome::Error,
                error_code: Some(ErrorCode::RequestParamMissing.as_u32()),
                detail: Some("request body too large".to_string()),
            },
        );
    }
    let parameters = collect_parameters(query, body);
    let token = match extract_token(&parameters, auth_header) {
        Ok(token) => token,
        Err(err) => return auth_failure(state, &parameters, err.to_string()),
    };
    let session = match state.authenticator.authenticate(&token) {
        Ok(session) => session,
        Err(err) => return auth_failure(state, &parameters, err.to_string()),
    };
    let user = session.user_id.get();
    let action = match parameters.get(ACTION_PARAM) {
        Some(action) if !action.is_empty() => action.to_string(),
        _ => {
            let payload =
                state.output.error(ErrorCode::RequestParamMissing.as_u32(), "Bad Request: action");
            return (
                ApiReply {
                    status: StatusCode::OK,
                    content_type: state.dispatcher.content_type(),
                    challenge: false,
                    body: payload.into_bytes(),
                },
                RequestRecord {
                    action: None,
                    user: Some(user),
                    outcome: ApiOutcome::Error,
                    error_code: Some(ErrorCode::RequestParamMissing.as_u32()),
                    detail: Some("action parameter missing".to_string()),
                },
            );
        }
    };
    let gatekeeper = SessionGatekeeper::new(session);
    let request = ApiRequest::new(action.clone(), parameters, token);
    let outcome = state.dispatcher.dispatch(&gatekeeper, &request);
    let (status, label, error_code) = match outcome.status {
        DispatchStatus::Success => (StatusCode::OK, ApiOutcome::Ok, None),
        DispatchStatus::Failure(code) => {
            let status = if matches!(code, ErrorCode::InternalFailure) {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::OK
            };
            (status, ApiOutcome::Error, Some(code.as_u32()))
        }
    };
    (
        ApiReply {
            status,
            content_type: state.dispatcher.content_type(),
            challenge: false,
            body: outcome.payload.into_bytes(),
        },
        RequestRecord {
            action: Some(action),
            user: Some(user),
            outcome: label,
            error_code,
            detail: None,
        },
    )
}

/// Builds the fixed auth-failure reply and its audit record.
fn auth_failure(
    state: &GatewayState,
    parameters: &Parameters,
    detail: String,
) -> (ApiReply, RequestRecord) {
    let payload = state.output.error(AUTH_FAILURE_CODE, AUTH_FAILURE_MESSAGE);
    (
        ApiReply {
            status: StatusCode::UNAUTHORIZED,
            content_type: state.dispatcher.content_type(),
            challenge: true,
            body: payload.into_bytes(),
        },
        RequestRecord {
            action: parameters.get(ACTION_PARAM).map(str::to_string),
            user: None,
            outcome: ApiOutcome::Error,
            error_code: Some(AUTH_FAILURE_CODE),
            detail: Some(detail),
        },
    )
}

/// Merges query and body form parameters; body pairs win on collision.
fn collect_parameters(query: &str, body: &[u8]) -> Parameters {
    let mut parameters = Parameters::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        parameters.insert(key, value);
    }
    for (key, value) in url::form_urlencoded::parse(body) {
        parameters.insert(key, value);
    }
    parameters
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
