// crates/partita-core/src/methods/podcast_delete.rs
// ============================================================================
// Module: Podcast Delete Method
// Description: Guarded removal of a podcast subscription.
// Purpose: Gate the deletion on feature state and caller access level.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `podcast_delete` walks the same ladder as the episode variant but
//! authorizes against the manager threshold directly: removing a whole
//! subscription is a library-shape change, not an ownership question, so no
//! per-object policy applies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::access::AccessLevel;
use crate::core::error::ApiError;
use crate::core::identifiers::PodcastId;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::request::FILTER_PARAM;
use crate::core::resource::Feature;
use crate::core::resource::ResourceKind;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::FeatureGate;
use crate::interfaces::Gatekeeper;
use crate::interfaces::PodcastRepository;
use crate::interfaces::ServerCounters;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `podcast_delete` action.
pub struct PodcastDeleteMethod {
    /// Feature switch for the podcast subsystem.
    features: Arc<dyn FeatureGate>,
    /// Podcast lookups and removal.
    podcasts: Arc<dyn PodcastRepository>,
    /// Count refresh after a successful removal.
    counters: Arc<dyn ServerCounters>,
}

impl PodcastDeleteMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "podcast_delete";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(140_000);
    /// Access level required to remove a subscription.
    const REQUIRED_LEVEL: AccessLevel = AccessLevel::Manager;

    /// Creates the handler around the podcast feature's collaborators.
    #[must_use]
    pub fn new(
        features: Arc<dyn FeatureGate>,
        podcasts: Arc<dyn PodcastRepository>,
        counters: Arc<dyn ServerCounters>,
    ) -> Self {
        Self { features, podcasts, counters }
    }
}

impl ApiMethod for PodcastDeleteMethod {
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
        let Some(id) = PodcastId::parse(raw) else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        let Some(podcast) = self.podcasts.lookup(id)? else {
            return Err(ApiError::ResultEmpty { subject: raw.to_owned() }.into());
        };
        if !gatekeeper.may_access(ResourceKind::Podcast, Self::REQUIRED_LEVEL) {
            return Err(ApiError::AccessDenied { required: Self::REQUIRED_LEVEL }.into());
        }
        if self.podcasts.remove(podcast.id)? {
            self.counters.refresh_count(ResourceKind::Podcast)?;
            Ok(output.success(&format!("podcast {} deleted", podcast.id)))
        } else {
            Err(ApiError::RequestParamMissing { subject: podcast.id.to_string() }.into())
        }
    }
}
