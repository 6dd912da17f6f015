// crates/partita-core/src/methods/song.rs
// ============================================================================
// Module: Song Method
// Description: Single-song lookup by identifier.
// Purpose: Resolve the `filter` parameter to one song and render it.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `song` resolves the required `filter` parameter to one library song. A
//! missing parameter, a non-numeric identifier, and an identifier with no
//! backing record are three distinct outcomes; only the first is a parameter
//! error, the other two report what was not found.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::identifiers::SongId;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::request::FILTER_PARAM;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::Gatekeeper;
use crate::interfaces::SongRepository;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `song` action.
pub struct SongMethod {
    /// Song lookups.
    songs: Arc<dyn SongRepository>,
}

impl SongMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "song";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(100_000);

    /// Creates the handler around a song repository.
    #[must_use]
    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }
}

impl ApiMethod for SongMethod {
    fn action(&self) -> &'static str {
        Self::ACTION
    }

    fn minimum_version(&self) -> ProtocolVersion {
        Self::MINIMUM_VERSION
    }

    fn handle(
        &self,
        gatekeeper: &dyn Gatekeeper,
        output: &dyn ApiOutput,
        request: &ApiRequest,
    ) -> Result<Payload, MethodFailure> {
        let raw = request.parameters.required(FILTER_PARAM)?;
        let Some(id) = SongId::parse(raw) else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        let Some(song) = self.songs.lookup(id)? else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        Ok(output.songs(&[song.id], gatekeeper.user_id(), true, false)?)
    }
}
