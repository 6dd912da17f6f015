// crates/partita-core/src/core/error.rs
// ============================================================================
// Module: Partita Error Taxonomy
// Description: Caller-visible API failures with stable codes and templates.
// Purpose: Give every expected failure a typed value the dispatcher can render.
// Dependencies: thiserror, crate::core
// ============================================================================

//! ## Overview
//! Every expected failure an API action can produce is one of five
//! [`ApiError`] kinds. Each kind carries a stable numeric code and renders
//! through a stable message template, so client software can match on either.
//! None of these failures crashes the dispatcher; the dispatcher is the single
//! point that turns them into error payloads.
//!
//! A failed mutation (storage refused a `remove`) is deliberately reported as
//! [`ApiError::RequestParamMissing`]: existing clients treat that as a
//! caller-side bad request, and the contract is preserved as-is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::access::AccessLevel;
use crate::core::resource::Feature;

// ============================================================================
// SECTION: Error Codes
// ============================================================================

/// Stable numeric code attached to every error envelope.
///
/// # Invariants
/// - Codes are wire-stable; new codes extend the table, existing ones never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// 4700: the subsystem the action depends on is switched off.
    FunctionDisabled,
    /// 4703: caller authenticated but lacks the required permission.
    AccessDenied,
    /// 4704: the id resolved to nothing, or a list query had no rows.
    ResultEmpty,
    /// 4705: no handler is registered for the action name.
    UnknownAction,
    /// 4710: a mandatory parameter was absent, or storage refused a mutation.
    RequestParamMissing,
    /// 4790: a collaborator failed; the request cannot be answered.
    InternalFailure,
}

impl ErrorCode {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::FunctionDisabled => 4700,
            Self::AccessDenied => 4703,
            Self::ResultEmpty => 4704,
            Self::UnknownAction => 4705,
            Self::RequestParamMissing => 4710,
            Self::InternalFailure => 4790,
        }
    }

    /// Returns a stable label for audit and metric records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FunctionDisabled => "function_disabled",
            Self::AccessDenied => "access_denied",
            Self::ResultEmpty => "result_empty",
            Self::UnknownAction => "unknown_action",
            Self::RequestParamMissing => "request_param_missing",
            Self::InternalFailure => "internal_failure",
        }
    }
}

// ============================================================================
// SECTION: API Errors
// ============================================================================

/// Caller-visible failure raised by a handler or the dispatcher.
///
/// # Invariants
/// - Message templates are wire-stable per kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The subsystem the action depends on is switched off by configuration.
    #[error("Enable: {feature}")]
    FunctionDisabled {
        /// Feature that must be enabled.
        feature: Feature,
    },
    /// Caller lacks the permission level or ACL grant the action demands.
    #[error("Require: {required}")]
    AccessDenied {
        /// Minimum level the action demands.
        required: AccessLevel,
    },
    /// The id resolved to no existing resource, or a lookup went nowhere.
    #[error("Not Found: {subject}")]
    ResultEmpty {
        /// Offending identifier as the caller sent it.
        subject: String,
    },
    /// No handler is registered for the requested action.
    #[error("Invalid Request: {action}")]
    UnknownAction {
        /// Action name the caller requested.
        action: String,
    },
    /// A mandatory key was absent, or storage refused the mutation.
    #[error("Bad Request: {subject}")]
    RequestParamMissing {
        /// Missing key or refused identifier.
        subject: String,
    },
}

impl ApiError {
    /// Returns the stable code for the failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::FunctionDisabled { .. } => ErrorCode::FunctionDisabled,
            Self::AccessDenied { .. } => ErrorCode::AccessDenied,
            Self::ResultEmpty { .. } => ErrorCode::ResultEmpty,
            Self::UnknownAction { .. } => ErrorCode::UnknownAction,
            Self::RequestParamMissing { .. } => ErrorCode::RequestParamMissing,
        }
    }
}
