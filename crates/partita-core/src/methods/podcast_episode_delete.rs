// crates/partita-core/src/methods/podcast_episode_delete.rs
// ============================================================================
// Module: Podcast Episode Delete Method
// Description: Guarded removal of a single podcast episode.
// Purpose: Apply the full validation ladder before mutating the library.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `podcast_episode_delete` walks the complete validation ladder: feature
//! gate, required `filter` parameter, episode resolution, deletion policy,
//! removal, count refresh. The ladder short-circuits at the first failed
//! rung, so a disabled feature is reported before a missing parameter and a
//! missing episode is reported before authorization runs. No mutation
//! happens on any failed rung.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::access::AccessLevel;
use crate::core::error::ApiError;
use crate::core::identifiers::PodcastEpisodeId;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::request::FILTER_PARAM;
use crate::core::resource::Feature;
use crate::core::resource::ResourceKind;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::DeletionPolicy;
use crate::interfaces::FeatureGate;
use crate::interfaces::Gatekeeper;
use crate::interfaces::PodcastEpisodeRepository;
use crate::interfaces::ServerCounters;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `podcast_episode_delete` action.
pub struct PodcastEpisodeDeleteMethod {
    /// Feature switch for the podcast subsystem.
    features: Arc<dyn FeatureGate>,
    /// Episode lookups and removal.
    episodes: Arc<dyn PodcastEpisodeRepository>,
    /// Per-object deletion eligibility.
    deletion: Arc<dyn DeletionPolicy>,
    /// Count refresh after a successful removal.
    counters: Arc<dyn ServerCounters>,
}

impl PodcastEpisodeDeleteMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "podcast_episode_delete";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(140_000);

    /// Creates the handler around the podcast feature's collaborators.
    #[must_use]
    pub fn new(
        features: Arc<dyn FeatureGate>,
        episodes: Arc<dyn PodcastEpisodeRepository>,
        deletion: Arc<dyn DeletionPolicy>,
        counters: Arc<dyn ServerCounters>,
    ) -> Self {
        Self { features, episodes, deletion, counters }
    }
}

impl ApiMethod for PodcastEpisodeDeleteMethod {
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
        if !self.features.is_enabled(Feature::Podcasts) {
            return Err(ApiError::FunctionDisabled { feature: Feature::Podcasts }.into());
        }
        let raw = request.parameters.required(FILTER_PARAM)?;
        let Some(id) = PodcastEpisodeId::parse(raw) else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        let Some(episode) = self.episodes.lookup(id)? else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        if !self.deletion.may_delete(gatekeeper, ResourceKind::PodcastEpisode, episode.id.get()) {
            return Err(ApiError::AccessDenied { required: AccessLevel::Manager }.into());
        }
        if self.episodes.remove(episode.id)? {
            self.counters.refresh_count(ResourceKind::PodcastEpisode)?;
            Ok(output.success(&format!("podcast_episode {} deleted", episode.id)))
        } else {
            Err(ApiError::RequestParamMissing { subject: episode.id.to_string() }.into())
        }
    }
}

#[cfg(test)]
mod tests;
