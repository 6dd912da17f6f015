// crates/partita-core/src/core/details.rs
// ============================================================================
// Module: Partita Server Details
// Description: Aggregate status snapshot values reported by diagnostic actions.
// Purpose: Provide the flat read model combining dates, counts, and version data.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! [`ServerDetails`] is the flat snapshot the `ping` action reports: the
//! caller's token echoed back, the release string, the three last-action
//! timestamps rendered as RFC 3339 strings, and one count per entity family.
//! It is a pure value recomputed per query; nothing at this layer caches it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AuthToken;

// ============================================================================
// SECTION: Action Dates
// ============================================================================

/// Last-action timestamps reported by the catalog collaborator.
///
/// # Invariants
/// - Values are unix seconds; zero means the action never ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDates {
    /// Last catalog update.
    pub update: i64,
    /// Last catalog addition.
    pub add: i64,
    /// Last catalog clean.
    pub clean: i64,
}

impl ActionDates {
    /// Creates a set of last-action timestamps.
    #[must_use]
    pub const fn new(update: i64, add: i64, clean: i64) -> Self {
        Self { update, add, clean }
    }
}

// ============================================================================
// SECTION: Server Details
// ============================================================================

/// Flat server status snapshot.
///
/// # Invariants
/// - Timestamp fields hold locale-independent RFC 3339 renderings.
/// - `playlists` already includes saved searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDetails {
    /// Token the caller authenticated with, echoed back.
    pub auth: AuthToken,
    /// Release string of the answering server.
    pub api: String,
    /// Last catalog update, RFC 3339.
    pub update: String,
    /// Last catalog addition, RFC 3339.
    pub add: String,
    /// Last catalog clean, RFC 3339.
    pub clean: String,
    /// Song count.
    pub songs: u64,
    /// Album count.
    pub albums: u64,
    /// Artist count.
    pub artists: u64,
    /// Genre count.
    pub genres: u64,
    /// Stored playlists plus saved searches.
    pub playlists: u64,
    /// Account count.
    pub users: u64,
    /// Catalog count.
    pub catalogs: u64,
    /// Video count.
    pub videos: u64,
    /// Podcast subscription count.
    pub podcasts: u64,
    /// Podcast episode count.
    pub podcast_episodes: u64,
    /// Share link count.
    pub shares: u64,
    /// License count.
    pub licenses: u64,
    /// Live stream count.
    pub live_streams: u64,
    /// Label count.
    pub labels: u64,
}
