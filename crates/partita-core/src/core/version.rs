// crates/partita-core/src/core/version.rs
// ============================================================================
// Module: Partita Protocol Versions
// Description: Protocol version metadata and per-action availability records.
// Purpose: Make version metadata an injected value, never a mutable global.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The remote protocol carries a scaled integer version: major * 100000 +
//! minor * 1000 + patch. Every action records the protocol version at which it
//! became available, and the catalog of those records is queryable by callers
//! through the `methods` action. Version values are injected at startup;
//! nothing in this crate reads them from a global.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Protocol Version
// ============================================================================

/// Scaled integer protocol version (major * 100000 + minor * 1000 + patch).
///
/// # Invariants
/// - Ordering follows release order; the scaled encoding is wire-stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(u32);

impl ProtocolVersion {
    /// Creates a protocol version from its scaled encoding.
    #[must_use]
    pub const fn new(scaled: u32) -> Self {
        Self(scaled)
    }

    /// Returns the scaled encoding.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Protocol version spoken by this build.
pub const CURRENT_PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion::new(160_000);

/// Release string reported to clients.
pub const SERVER_RELEASE: &str = "1.6.0";

// ============================================================================
// SECTION: Server Version
// ============================================================================

/// Version metadata injected into version-reporting components at startup.
///
/// # Invariants
/// - `protocol` and `release` describe the same build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Scaled protocol version.
    pub protocol: ProtocolVersion,
    /// Human-readable release string.
    pub release: String,
}

impl ServerVersion {
    /// Returns the version metadata for this build.
    #[must_use]
    pub fn current() -> Self {
        Self {
            protocol: CURRENT_PROTOCOL_VERSION,
            release: SERVER_RELEASE.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Action Descriptors
// ============================================================================

/// Availability metadata for one registered action.
///
/// # Invariants
/// - `action` is unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action name as dispatched.
    pub action: String,
    /// Protocol version at which the action became available.
    pub minimum_version: ProtocolVersion,
}

impl ActionDescriptor {
    /// Creates a descriptor for an action.
    #[must_use]
    pub fn new(action: impl Into<String>, minimum_version: ProtocolVersion) -> Self {
        Self {
            action: action.into(),
            minimum_version,
        }
    }
}
