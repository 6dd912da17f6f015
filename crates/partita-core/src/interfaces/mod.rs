// crates/partita-core/src/interfaces/mod.rs
// ============================================================================
// Module: Partita Interfaces
// Description: Backend-agnostic seams for authentication, storage, and output.
// Purpose: Define the contract surfaces the dispatch core consumes.
// Dependencies: thiserror, crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how the gateway reaches external systems without
//! embedding backend details. Repositories answer lookups with `Option`
//! values, mutations report storage refusal as a plain `false`, and every
//! seam reserves a typed error for hard failures so handlers can surface
//! collaborator breakage through the unrecoverable channel.
//!
//! Security posture: implementations consume untrusted identifiers and
//! tokens; they must fail closed on anything they do not recognize.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::access::AccessLevel;
use crate::core::access::Session;
use crate::core::details::ActionDates;
use crate::core::details::ServerDetails;
use crate::core::identifiers::AuthToken;
use crate::core::identifiers::PodcastEpisodeId;
use crate::core::identifiers::PodcastId;
use crate::core::identifiers::SongId;
use crate::core::identifiers::UserId;
use crate::core::payload::Payload;
use crate::core::resource::Feature;
use crate::core::resource::Podcast;
use crate::core::resource::PodcastEpisode;
use crate::core::resource::ResourceKind;
use crate::core::resource::Song;
use crate::core::resource::User;
use crate::core::version::ActionDescriptor;

// ============================================================================
// SECTION: Gatekeeper
// ============================================================================

/// Authorization context for one authenticated request.
///
/// Authentication already happened when a gatekeeper exists: the transport
/// resolves the token through an [`Authenticator`] and only then builds the
/// gatekeeper handlers consult.
pub trait Gatekeeper: Send + Sync {
    /// Returns the authenticated caller.
    fn user_id(&self) -> UserId;

    /// Returns true when the caller may act on the kind at the given minimum level.
    fn may_access(&self, kind: ResourceKind, minimum: AccessLevel) -> bool;
}

// ============================================================================
// SECTION: Authenticator
// ============================================================================

/// Authentication errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token does not resolve to any account.
    #[error("invalid authentication token")]
    InvalidToken,
    /// Authentication backend reported an error.
    #[error("authentication backend error: {0}")]
    Backend(String),
}

/// Resolves authentication tokens into sessions.
pub trait Authenticator: Send + Sync {
    /// Resolves a token into an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the token is unknown or the backend fails.
    fn authenticate(&self, token: &AuthToken) -> Result<Session, AuthError>;
}

// ============================================================================
// SECTION: Feature Gate
// ============================================================================

/// Boolean configuration switch per optional subsystem.
pub trait FeatureGate: Send + Sync {
    /// Returns true when the feature is enabled.
    fn is_enabled(&self, feature: Feature) -> bool;
}

// ============================================================================
// SECTION: Library Repositories
// ============================================================================

/// Media library errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Library I/O error.
    #[error("media library io error: {0}")]
    Io(String),
    /// Library data is invalid or inconsistent.
    #[error("media library invalid data: {0}")]
    Invalid(String),
    /// Library backend reported an error.
    #[error("media library error: {0}")]
    Backend(String),
}

/// Song lookups.
pub trait SongRepository: Send + Sync {
    /// Looks up a song by identifier; `None` when no such song exists.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn lookup(&self, id: SongId) -> Result<Option<Song>, LibraryError>;
}

/// Account lookups and listings.
pub trait UserRepository: Send + Sync {
    /// Looks up an account by identifier; `None` when no such account exists.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn lookup(&self, id: UserId) -> Result<Option<User>, LibraryError>;

    /// Returns the identifiers of all valid accounts.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn valid_ids(&self) -> Result<Vec<UserId>, LibraryError>;
}

/// Podcast subscription lookups and removal.
pub trait PodcastRepository: Send + Sync {
    /// Looks up a podcast by identifier; `None` when no such podcast exists.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn lookup(&self, id: PodcastId) -> Result<Option<Podcast>, LibraryError>;

    /// Removes a podcast; returns false when storage refuses the removal.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails outright.
    fn remove(&self, id: PodcastId) -> Result<bool, LibraryError>;
}

/// Podcast episode lookups and removal.
pub trait PodcastEpisodeRepository: Send + Sync {
    /// Looks up an episode by identifier; `None` when no such episode exists.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn lookup(&self, id: PodcastEpisodeId) -> Result<Option<PodcastEpisode>, LibraryError>;

    /// Removes an episode; returns false when storage refuses the removal.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails outright.
    fn remove(&self, id: PodcastEpisodeId) -> Result<bool, LibraryError>;
}

/// Catalog maintenance timestamps.
pub trait CatalogRepository: Send + Sync {
    /// Returns the last update/add/clean timestamps across all catalogs.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn last_action_dates(&self) -> Result<ActionDates, LibraryError>;
}

/// Aggregate entity counters.
pub trait ServerCounters: Send + Sync {
    /// Returns per-entity counts keyed by storage table name.
    ///
    /// When `refresh` is true the backend recounts from storage instead of
    /// serving cached totals.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn entity_counts(&self, refresh: bool) -> Result<BTreeMap<String, u64>, LibraryError>;

    /// Recomputes the cached count for one entity kind after a mutation.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError`] when the backend fails.
    fn refresh_count(&self, kind: ResourceKind) -> Result<(), LibraryError>;
}

// ============================================================================
// SECTION: Deletion Policy
// ============================================================================

/// Deletion eligibility check for media objects.
///
/// Implementations may combine level checks with ownership lookups; the
/// bundled [`LevelDeletionPolicy`] only demands the manager level.
pub trait DeletionPolicy: Send + Sync {
    /// Returns true when the caller may delete the identified object.
    fn may_delete(&self, gatekeeper: &dyn Gatekeeper, kind: ResourceKind, object_id: u64) -> bool;
}

/// Deletion policy that requires the manager level for every removal.
///
/// # Invariants
/// - Stateless; decisions depend only on the gatekeeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelDeletionPolicy;

impl DeletionPolicy for LevelDeletionPolicy {
    fn may_delete(&self, gatekeeper: &dyn Gatekeeper, kind: ResourceKind, _object_id: u64) -> bool {
        gatekeeper.may_access(kind, AccessLevel::Manager)
    }
}

// ============================================================================
// SECTION: Output Formatter
// ============================================================================

/// Output formatting errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// Serialization failed.
    #[error("output serialization error: {0}")]
    Serialization(String),
    /// The formatter's record source failed.
    #[error("output source error: {0}")]
    Source(String),
}

impl From<LibraryError> for OutputError {
    fn from(error: LibraryError) -> Self {
        Self::Source(error.to_string())
    }
}

/// Wire-format serializer consumed by handlers.
///
/// One method exists per result shape. Handlers never branch on the concrete
/// format; they hand over identifiers and receive opaque payload bytes.
pub trait ApiOutput: Send + Sync {
    /// Returns the content type of produced payloads.
    fn content_type(&self) -> &'static str;

    /// Serializes a list of songs.
    ///
    /// `include_detail` adds extended fields; `share_context` marks the
    /// payload as destined for a share link, which suppresses caller-bound
    /// stream URLs.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when record resolution or serialization fails.
    fn songs(
        &self,
        ids: &[SongId],
        caller: UserId,
        include_detail: bool,
        share_context: bool,
    ) -> Result<Payload, OutputError>;

    /// Serializes a list of accounts.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when record resolution or serialization fails.
    fn users(&self, ids: &[UserId]) -> Result<Payload, OutputError>;

    /// Serializes the aggregate server status snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when serialization fails.
    fn server_details(&self, details: &ServerDetails) -> Result<Payload, OutputError>;

    /// Serializes the catalog of registered actions.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] when serialization fails.
    fn action_catalog(&self, entries: &[ActionDescriptor]) -> Result<Payload, OutputError>;

    /// Serializes a bare success message.
    fn success(&self, message: &str) -> Payload;

    /// Serializes the distinct empty-result marker for a kind.
    fn empty_result(&self, kind: ResourceKind) -> Payload;

    /// Serializes an error envelope.
    fn error(&self, code: u32, message: &str) -> Payload;
}
