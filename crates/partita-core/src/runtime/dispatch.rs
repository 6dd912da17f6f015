// crates/partita-core/src/runtime/dispatch.rs
// ============================================================================
// Module: Dispatcher
// Description: Action lookup and uniform failure rendering.
// Purpose: Route one request to its handler and always return a payload.
// Dependencies: crate::core, crate::interfaces, crate::methods, crate::runtime
// ============================================================================

//! ## Overview
//! The dispatcher owns the action registry and the output port. It is the
//! single point where typed failures become error payloads: handlers raise
//! [`MethodFailure`] values and never render errors themselves. Dispatch
//! never propagates a failure to the transport; every outcome carries a
//! rendered payload plus a status the transport can map onto its own codes.
//!
//! The dispatcher holds no mutable state, so one instance serves concurrent
//! requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::error::ErrorCode;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::version::ServerVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::CatalogRepository;
use crate::interfaces::DeletionPolicy;
use crate::interfaces::FeatureGate;
use crate::interfaces::Gatekeeper;
use crate::interfaces::PodcastEpisodeRepository;
use crate::interfaces::PodcastRepository;
use crate::interfaces::ServerCounters;
use crate::interfaces::SongRepository;
use crate::interfaces::UserRepository;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;
use crate::methods::catalog::MethodsMethod;
use crate::methods::default_catalog;
use crate::methods::ping::PingMethod;
use crate::methods::podcast_delete::PodcastDeleteMethod;
use crate::methods::podcast_episode_delete::PodcastEpisodeDeleteMethod;
use crate::methods::song::SongMethod;
use crate::methods::users::UsersMethod;
use crate::runtime::details::ServerDetailsRetriever;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Collaborators needed to assemble the bundled method set.
pub struct RegistryWiring {
    /// Feature gate consulted by gated actions.
    pub features: Arc<dyn FeatureGate>,
    /// Song lookups.
    pub songs: Arc<dyn SongRepository>,
    /// Account lookups.
    pub users: Arc<dyn UserRepository>,
    /// Podcast subscription lookups and removal.
    pub podcasts: Arc<dyn PodcastRepository>,
    /// Podcast episode lookups and removal.
    pub episodes: Arc<dyn PodcastEpisodeRepository>,
    /// Last-action dates.
    pub catalog: Arc<dyn CatalogRepository>,
    /// Entity counts.
    pub counters: Arc<dyn ServerCounters>,
    /// Per-object deletion eligibility.
    pub deletion: Arc<dyn DeletionPolicy>,
    /// Version metadata reported by status actions.
    pub version: ServerVersion,
}

/// Name-keyed registry of API methods.
///
/// # Invariants
/// - At most one handler per action name; re-registration replaces.
#[derive(Default)]
pub struct MethodRegistry {
    /// Registered handlers keyed by action name.
    methods: BTreeMap<&'static str, Arc<dyn ApiMethod>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { methods: BTreeMap::new() }
    }

    /// Creates a registry holding every bundled method.
    #[must_use]
    pub fn with_default_methods(wiring: RegistryWiring) -> Self {
        let retriever = ServerDetailsRetriever::new(
            Arc::clone(&wiring.catalog),
            Arc::clone(&wiring.counters),
            wiring.version,
        );
        let mut registry = Self::new();
        registry.register(Arc::new(PingMethod::new(retriever)));
        registry.register(Arc::new(SongMethod::new(Arc::clone(&wiring.songs))));
        registry.register(Arc::new(UsersMethod::new(Arc::clone(&wiring.users))));
        registry.register(Arc::new(PodcastDeleteMethod::new(
            Arc::clone(&wiring.features),
            Arc::clone(&wiring.podcasts),
            Arc::clone(&wiring.counters),
        )));
        registry.register(Arc::new(PodcastEpisodeDeleteMethod::new(
            Arc::clone(&wiring.features),
            Arc::clone(&wiring.episodes),
            Arc::clone(&wiring.deletion),
            Arc::clone(&wiring.counters),
        )));
        registry.register(Arc::new(MethodsMethod::new(default_catalog())));
        registry
    }

    /// Registers a method under its own action name.
    pub fn register(&mut self, method: Arc<dyn ApiMethod>) {
        self.methods.insert(method.action(), method);
    }

    /// Looks up the handler for an action name.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&dyn ApiMethod> {
        self.methods.get(action).map(|method| method.as_ref())
    }

    /// Returns every registered action name in sorted order.
    #[must_use]
    pub fn actions(&self) -> Vec<&'static str> {
        self.methods.keys().copied().collect()
    }

    /// Returns the number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns whether no methods are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

// ============================================================================
// SECTION: Dispatch Outcome
// ============================================================================

/// Terminal status of one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// The handler produced a success payload.
    Success,
    /// The request failed with the carried taxonomy code.
    Failure(ErrorCode),
}

impl DispatchStatus {
    /// Returns whether the request succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of one dispatch: a rendered payload plus its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Wire payload, rendered for both success and failure.
    pub payload: Payload,
    /// Terminal status for transport-level mapping.
    pub status: DispatchStatus,
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Routes requests to registered methods and renders every failure.
pub struct Dispatcher {
    /// Action registry consulted per request.
    registry: MethodRegistry,
    /// Output port failures are rendered through.
    output: Arc<dyn ApiOutput>,
}

impl Dispatcher {
    /// Creates a dispatcher around a registry and an output port.
    #[must_use]
    pub fn new(registry: MethodRegistry, output: Arc<dyn ApiOutput>) -> Self {
        Self { registry, output }
    }

    /// Dispatches one authenticated request.
    ///
    /// An unregistered action, a handler taxonomy failure, and collaborator
    /// breakage all come back as rendered error payloads; this method never
    /// returns a bare error.
    #[must_use]
    pub fn dispatch(&self, gatekeeper: &dyn Gatekeeper, request: &ApiRequest) -> DispatchOutcome {
        let Some(method) = self.registry.get(request.action.as_str()) else {
            let error = ApiError::UnknownAction { action: request.action.clone() };
            return self.render_api_error(&error);
        };
        match method.handle(gatekeeper, self.output.as_ref(), request) {
            Ok(payload) => DispatchOutcome { payload, status: DispatchStatus::Success },
            Err(MethodFailure::Api(error)) => self.render_api_error(&error),
            Err(MethodFailure::Fatal(error)) => {
                let code = ErrorCode::InternalFailure;
                DispatchOutcome {
                    payload: self.output.error(code.as_u32(), &error.to_string()),
                    status: DispatchStatus::Failure(code),
                }
            }
        }
    }

    /// Returns the wire content type of the configured output port.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.output.content_type()
    }

    /// Returns the registered action names in sorted order.
    #[must_use]
    pub fn actions(&self) -> Vec<&'static str> {
        self.registry.actions()
    }

    /// Renders one expected taxonomy failure.
    fn render_api_error(&self, error: &ApiError) -> DispatchOutcome {
        let code = error.code();
        DispatchOutcome {
            payload: self.output.error(code.as_u32(), &error.to_string()),
            status: DispatchStatus::Failure(code),
        }
    }
}
