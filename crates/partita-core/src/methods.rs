// crates/partita-core/src/methods.rs
// ============================================================================
// Module: Partita API Methods
// Description: The per-action handler contract and the registered catalog.
// Purpose: Give every action one small command object with uniform validation.
// Dependencies: thiserror, crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Every API action is one [`ApiMethod`] implementation. Handlers apply a
//! fixed validation order: feature gate, required parameters, resource
//! resolution, authorization, execution, serialization. Expected failures are
//! [`ApiError`] values; collaborator breakage travels the separate
//! [`FatalError`] channel. A handler never emits a success payload after
//! detecting a failure: `?` makes the two paths mutually exclusive.
//!
//! Handlers hold no mutable state beyond constructor-injected collaborators,
//! so one instance serves concurrent requests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod ping;
pub mod podcast_delete;
pub mod podcast_episode_delete;
pub mod song;
pub mod users;

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::error::ApiError;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::version::ActionDescriptor;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::Gatekeeper;
use crate::interfaces::LibraryError;
use crate::interfaces::OutputError;
use crate::runtime::details::DetailsError;

// ============================================================================
// SECTION: Failure Channel
// ============================================================================

/// Unrecoverable failure raised when a collaborator breaks mid-request.
///
/// # Invariants
/// - Never maps to a caller-taxonomy code; the dispatcher renders it as an
///   internal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The media library failed.
    #[error("Internal Error: {0}")]
    Library(#[from] LibraryError),
    /// The output formatter failed.
    #[error("Internal Error: {0}")]
    Output(#[from] OutputError),
    /// The status snapshot could not be assembled.
    #[error("Internal Error: {0}")]
    Snapshot(#[from] DetailsError),
}

/// Failure raised by a handler, split into expected and unrecoverable kinds.
///
/// # Invariants
/// - `Api` failures are caller-visible taxonomy errors.
/// - `Fatal` failures never carry caller-taxonomy codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodFailure {
    /// Expected, caller-visible failure.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Collaborator breakage surfaced through the unrecoverable channel.
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl From<LibraryError> for MethodFailure {
    fn from(error: LibraryError) -> Self {
        Self::Fatal(FatalError::Library(error))
    }
}

impl From<OutputError> for MethodFailure {
    fn from(error: OutputError) -> Self {
        Self::Fatal(FatalError::Output(error))
    }
}

impl From<DetailsError> for MethodFailure {
    fn from(error: DetailsError) -> Self {
        Self::Fatal(FatalError::Snapshot(error))
    }
}

// ============================================================================
// SECTION: Method Contract
// ============================================================================

/// One registered API action.
pub trait ApiMethod: Send + Sync {
    /// Returns the action name the method is dispatched under.
    fn action(&self) -> &'static str;

    /// Returns the protocol version at which the action became available.
    fn minimum_version(&self) -> ProtocolVersion;

    /// Handles one request.
    ///
    /// # Errors
    ///
    /// Returns [`MethodFailure`] for both expected taxonomy failures and
    /// unrecoverable collaborator breakage; the dispatcher renders either
    /// into an error payload.
    fn handle(
        &self,
        gatekeeper: &dyn Gatekeeper,
        output: &dyn ApiOutput,
        request: &ApiRequest,
    ) -> Result<Payload, MethodFailure>;
}

// ============================================================================
// SECTION: Default Catalog
// ============================================================================

/// Returns availability metadata for every bundled action, sorted by name.
#[must_use]
pub fn default_catalog() -> Vec<ActionDescriptor> {
    let mut entries = vec![
        ActionDescriptor::new(
            catalog::MethodsMethod::ACTION,
            catalog::MethodsMethod::MINIMUM_VERSION,
        ),
        ActionDescriptor::new(ping::PingMethod::ACTION, ping::PingMethod::MINIMUM_VERSION),
        ActionDescriptor::new(
            podcast_delete::PodcastDeleteMethod::ACTION,
            podcast_delete::PodcastDeleteMethod::MINIMUM_VERSION,
        ),
        ActionDescriptor::new(
            podcast_episode_delete::PodcastEpisodeDeleteMethod::ACTION,
            podcast_episode_delete::PodcastEpisodeDeleteMethod::MINIMUM_VERSION,
        ),
        ActionDescriptor::new(song::SongMethod::ACTION, song::SongMethod::MINIMUM_VERSION),
        ActionDescriptor::new(users::UsersMethod::ACTION, users::UsersMethod::MINIMUM_VERSION),
    ];
    entries.sort_by(|a, b| a.action.cmp(&b.action));
    entries
}
