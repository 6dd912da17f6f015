// crates/partita-core/src/core/access.rs
// ============================================================================
// Module: Partita Access Model
// Description: Permission levels, per-request sessions, and the gatekeeper value type.
// Purpose: Provide the ordinal access-level lattice used by authorization checks.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Access control in Partita is an ordinal lattice: every account carries one
//! permission level, and an action is permitted when the caller's level is at
//! least the level the action demands. A [`Session`] is resolved once per
//! request from the authentication token and never mutated afterwards.
//! Destructive administrative actions require [`AccessLevel::Manager`].
//!
//! Security posture: sessions are derived from untrusted tokens by the
//! transport's authenticator; this module only reasons about already
//! authenticated identities.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::UserId;
use crate::core::resource::ResourceKind;
use crate::interfaces::Gatekeeper;

// ============================================================================
// SECTION: Access Levels
// ============================================================================

/// Ordinal permission level attached to an account.
///
/// # Invariants
/// - Ranks are stable wire values; higher rank means more privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Unauthenticated or link-only visitor.
    Guest,
    /// Ordinary library member.
    #[default]
    User,
    /// May curate catalog content.
    ContentManager,
    /// May run destructive administrative actions.
    Manager,
    /// Full control of the server.
    Administrator,
}

impl AccessLevel {
    /// Returns the numeric rank used in error messages and stored accounts.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Guest => 5,
            Self::User => 25,
            Self::ContentManager => 50,
            Self::Manager => 75,
            Self::Administrator => 100,
        }
    }

    /// Returns a stable label for the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::ContentManager => "content_manager",
            Self::Manager => "manager",
            Self::Administrator => "administrator",
        }
    }

    /// Resolves a level from its numeric rank (returns `None` for unknown ranks).
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            5 => Some(Self::Guest),
            25 => Some(Self::User),
            50 => Some(Self::ContentManager),
            75 => Some(Self::Manager),
            100 => Some(Self::Administrator),
            _ => None,
        }
    }

    /// Returns true when this level satisfies the given minimum.
    #[must_use]
    pub const fn grants(self, minimum: Self) -> bool {
        self.rank() >= minimum.rank()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rank().fmt(f)
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Authenticated caller identity for one request.
///
/// # Invariants
/// - Created once per request from a validated token; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account the token resolved to.
    pub user_id: UserId,
    /// Permission level of the account.
    pub level: AccessLevel,
}

impl Session {
    /// Creates a session for the given account and level.
    #[must_use]
    pub const fn new(user_id: UserId, level: AccessLevel) -> Self {
        Self { user_id, level }
    }
}

// ============================================================================
// SECTION: Session Gatekeeper
// ============================================================================

/// Gatekeeper backed by a resolved session.
///
/// Token validity is implied by construction: the transport only builds one of
/// these after the authenticator accepted the request token.
///
/// # Invariants
/// - Authorization decisions depend only on the immutable session.
#[derive(Debug, Clone)]
pub struct SessionGatekeeper {
    /// Session the gatekeeper answers for.
    session: Session,
}

impl SessionGatekeeper {
    /// Creates a gatekeeper for an authenticated session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Returns the underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }
}

impl Gatekeeper for SessionGatekeeper {
    fn user_id(&self) -> UserId {
        self.session.user_id
    }

    fn may_access(&self, _kind: ResourceKind, minimum: AccessLevel) -> bool {
        self.session.level.grants(minimum)
    }
}
