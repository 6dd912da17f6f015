// crates/partita-core/src/runtime/details.rs
// ============================================================================
// Module: Server Details Retriever
// Description: Assembly of the flat server status snapshot.
// Purpose: Combine action dates, entity counts, and version metadata.
// Dependencies: thiserror, time, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The retriever issues exactly one call to each collaborator per invocation
//! and performs the key translation the wire contract promises: the stored
//! `tag` count surfaces as `genres`, and `playlists` is the sum of stored
//! playlists and saved searches. Timestamps render as RFC 3339 in UTC so the
//! snapshot is locale-independent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::details::ServerDetails;
use crate::core::identifiers::AuthToken;
use crate::core::version::ServerVersion;
use crate::interfaces::CatalogRepository;
use crate::interfaces::LibraryError;
use crate::interfaces::ServerCounters;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure raised while assembling the status snapshot.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailsError {
    /// A library collaborator failed.
    #[error("{0}")]
    Library(#[from] LibraryError),
    /// A stored timestamp could not be rendered.
    #[error("timestamp rendering failed: {0}")]
    Timestamp(String),
}

// ============================================================================
// SECTION: Retriever
// ============================================================================

/// Builds the flat status snapshot served by the `ping` action.
pub struct ServerDetailsRetriever {
    /// Last-action dates.
    catalog: Arc<dyn CatalogRepository>,
    /// Entity counts.
    counters: Arc<dyn ServerCounters>,
    /// Version metadata injected at startup.
    version: ServerVersion,
}

impl ServerDetailsRetriever {
    /// Creates a retriever around the two status collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        counters: Arc<dyn ServerCounters>,
        version: ServerVersion,
    ) -> Self {
        Self { catalog, counters, version }
    }

    /// Assembles one snapshot, echoing the caller's token.
    ///
    /// Issues exactly one call per collaborator; absent count keys read as
    /// zero rather than failing the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DetailsError`] when a collaborator fails or a stored
    /// timestamp falls outside the renderable range.
    pub fn retrieve(&self, token: &AuthToken) -> Result<ServerDetails, DetailsError> {
        let dates = self.catalog.last_action_dates()?;
        let counts = self.counters.entity_counts(false)?;
        let count = |key: &str| lookup_count(&counts, key);
        let playlists = count("playlist").saturating_add(count("search"));
        Ok(ServerDetails {
            auth: token.clone(),
            api: self.version.release.clone(),
            update: render_timestamp(dates.update)?,
            add: render_timestamp(dates.add)?,
            clean: render_timestamp(dates.clean)?,
            songs: count("song"),
            albums: count("album"),
            artists: count("artist"),
            genres: count("tag"),
            playlists,
            users: count("user"),
            catalogs: count("catalog"),
            videos: count("video"),
            podcasts: count("podcast"),
            podcast_episodes: count("podcast_episode"),
            shares: count("share"),
            licenses: count("license"),
            live_streams: count("live_stream"),
            labels: count("label"),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads one entity count, treating an absent key as zero.
fn lookup_count(counts: &BTreeMap<String, u64>, key: &str) -> u64 {
    counts.get(key).copied().unwrap_or(0)
}

/// Renders a unix timestamp as an RFC 3339 string in UTC.
fn render_timestamp(seconds: i64) -> Result<String, DetailsError> {
    let moment = OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|error| DetailsError::Timestamp(error.to_string()))?;
    moment.format(&Rfc3339).map_err(|error| DetailsError::Timestamp(error.to_string()))
}

#[cfg(test)]
mod tests;
