// crates/partita-server/src/auth.rs
// ============================================================================
// Module: Transport Authentication
// Description: Token extraction and credential resolution for API requests.
// Purpose: Turn an untrusted request token into an authenticated session.
// Dependencies: partita-config, partita-core, thiserror
// ============================================================================

//! ## Overview
//! Authentication happens once per request, before dispatch: the transport
//! extracts a token from the `auth` query parameter (or an `Authorization:
//! Bearer` header as a fallback), and an [`Authenticator`] resolves it to a
//! [`Session`]. Handlers never see raw tokens beyond the already-validated
//! request value.
//!
//! Invariants:
//! - Resolution is fail-closed: unknown and empty tokens are rejected.
//! - Token comparison is exact; no trimming or case folding is applied.
//!
//! Security posture: rejects oversized authorization headers before parsing;
//! see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use partita_config::AuthConfig;
use partita_core::AuthError;
use partita_core::AuthToken;
use partita_core::Authenticator;
use partita_core::Parameters;
use partita_core::Session;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Wire error code for failed transport authentication.
///
/// Never produced by method handlers; it exists outside the dispatch taxonomy
/// because an unauthenticated request never reaches a handler.
pub const AUTH_FAILURE_CODE: u32 = 4701;

/// Wire error message for failed transport authentication.
pub const AUTH_FAILURE_MESSAGE: &str = "Session Expired";

/// Request parameter carrying the API token.
pub const AUTH_PARAM: &str = "auth";

/// Maximum accepted authorization header size in bytes.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Token extraction failures at the transport boundary.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Messages feed audit records only; the wire response stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Neither the `auth` parameter nor the authorization header holds a token.
    #[error("missing auth token")]
    Missing,
    /// Authorization header exceeds the size cap.
    #[error("authorization header too large")]
    Oversized,
    /// Authorization header is present but not a usable bearer credential.
    #[error("invalid authorization header")]
    Invalid,
}

// ============================================================================
// SECTION: Static Authenticator
// ============================================================================

/// Authenticator backed by the static API keys from configuration.
///
/// # Invariants
/// - The credential map is immutable after construction.
pub struct StaticAuthenticator {
    /// Token to session bindings.
    credentials: BTreeMap<String, Session>,
}

impl StaticAuthenticator {
    /// Builds an authenticator from validated credential configuration.
    ///
    /// Entries whose account id cannot be represented are skipped; a config
    /// that passed validation has none.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let credentials = config
            .api_keys
            .iter()
            .filter_map(|key| {
                key.credential().map(|(token, session)| (token.as_str().to_owned(), session))
            })
            .collect();
        Self { credentials }
    }

    /// Returns the number of registered credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Returns true when no credentials are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, token: &AuthToken) -> Result<Session, AuthError> {
        self.credentials.get(token.as_str()).cloned().ok_or(AuthError::InvalidToken)
    }
}

// ============================================================================
// SECTION: Token Extraction
// ============================================================================

/// Extracts the request token from parameters or the authorization header.
///
/// The `auth` parameter is the primary carrier; a `Bearer` authorization
/// header is accepted as a fallback for clients that keep tokens out of URLs.
///
/// # Errors
///
/// Returns [`TokenError`] when neither carrier holds a token.
pub fn extract_token(
    parameters: &Parameters,
    auth_header: Option<&str>,
) -> Result<AuthToken, TokenError> {
    if let Some(token) = parameters.get(AUTH_PARAM) {
        if !token.is_empty() {
            return Ok(AuthToken::new(token));
        }
    }
    parse_bearer_token(auth_header)
}

/// Parses a `Bearer` token from an authorization header value.
fn parse_bearer_token(auth_header: Option<&str>) -> Result<AuthToken, TokenError> {
    let header = auth_header.ok_or(TokenError::Missing)?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(TokenError::Oversized);
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(TokenError::Invalid);
    }
    Ok(AuthToken::new(token))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
