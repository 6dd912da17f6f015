// crates/partita-core/src/core/request.rs
// ============================================================================
// Module: Partita API Request
// Description: The dispatched request value and its untyped parameter map.
// Purpose: Provide fail-closed accessors over caller-supplied parameters.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! An [`ApiRequest`] is immutable once dispatched: the action name selects a
//! handler, the parameter map carries everything the caller sent, and the
//! token identifies the session the transport already authenticated. Absent
//! keys are meaningful; [`Parameters::required`] turns absence into the
//! caller-visible `Bad Request` failure without touching any collaborator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::ApiError;
use crate::core::identifiers::AuthToken;

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Untyped request parameters keyed by name.
///
/// # Invariants
/// - Keys are unique; later inserts replace earlier values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, String>);

impl Parameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a parameter map from key/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for a key when present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the value for a mandatory key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestParamMissing`] naming the key when absent.
    pub fn required(&self, key: &str) -> Result<&str, ApiError> {
        self.get(key).ok_or_else(|| ApiError::RequestParamMissing {
            subject: key.to_string(),
        })
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// Request parameter carrying the target object identifier.
pub const FILTER_PARAM: &str = "filter";

/// One dispatched API request.
///
/// # Invariants
/// - Immutable once dispatched; handlers only read from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Action name selecting the handler.
    pub action: String,
    /// Untyped caller-supplied parameters.
    pub parameters: Parameters,
    /// Token the transport authenticated the caller with.
    pub token: AuthToken,
}

impl ApiRequest {
    /// Creates a request for the given action.
    #[must_use]
    pub fn new(action: impl Into<String>, parameters: Parameters, token: AuthToken) -> Self {
        Self {
            action: action.into(),
            parameters,
            token,
        }
    }
}
