// crates/partita-core/src/lib.rs
// ============================================================================
// Module: Partita Core Library
// Description: Method dispatch and access-control core of the Partita API.
// Purpose: Define the request pipeline from action name to wire payload.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Partita Core is the request-handling heart of the Partita media server's
//! remote API: a registry of per-action methods, the gatekeeper contract
//! that separates authentication from authorization, a stable error
//! taxonomy, and the output port handlers serialize through.
//! Invariants:
//! - Handlers apply a fixed validation order and never emit a success
//!   payload after detecting a failure.
//! - The dispatcher renders every failure as a payload; raw errors never
//!   reach the transport.
//! - Expected taxonomy failures and collaborator breakage travel separate
//!   channels.
//!
//! Security posture: enforces per-action access levels on authenticated
//! requests; see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod methods;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::access::AccessLevel;
pub use crate::core::access::Session;
pub use crate::core::access::SessionGatekeeper;
pub use crate::core::details::ActionDates;
pub use crate::core::details::ServerDetails;
pub use crate::core::error::ApiError;
pub use crate::core::error::ErrorCode;
pub use crate::core::identifiers::AuthToken;
pub use crate::core::identifiers::PodcastEpisodeId;
pub use crate::core::identifiers::PodcastId;
pub use crate::core::identifiers::SongId;
pub use crate::core::identifiers::UserId;
pub use crate::core::payload::Payload;
pub use crate::core::request::ApiRequest;
pub use crate::core::request::FILTER_PARAM;
pub use crate::core::request::Parameters;
pub use crate::core::resource::Feature;
pub use crate::core::resource::Podcast;
pub use crate::core::resource::PodcastEpisode;
pub use crate::core::resource::ResourceKind;
pub use crate::core::resource::Song;
pub use crate::core::resource::User;
pub use crate::core::version::ActionDescriptor;
pub use crate::core::version::CURRENT_PROTOCOL_VERSION;
pub use crate::core::version::ProtocolVersion;
pub use crate::core::version::SERVER_RELEASE;
pub use crate::core::version::ServerVersion;
pub use crate::interfaces::ApiOutput;
pub use crate::interfaces::AuthError;
pub use crate::interfaces::Authenticator;
pub use crate::interfaces::CatalogRepository;
pub use crate::interfaces::DeletionPolicy;
pub use crate::interfaces::FeatureGate;
pub use crate::interfaces::Gatekeeper;
pub use crate::interfaces::LevelDeletionPolicy;
pub use crate::interfaces::LibraryError;
pub use crate::interfaces::OutputError;
pub use crate::interfaces::PodcastEpisodeRepository;
pub use crate::interfaces::PodcastRepository;
pub use crate::interfaces::ServerCounters;
pub use crate::interfaces::SongRepository;
pub use crate::interfaces::UserRepository;
pub use crate::methods::ApiMethod;
pub use crate::methods::FatalError;
pub use crate::methods::MethodFailure;
pub use crate::methods::default_catalog;
pub use crate::runtime::details::DetailsError;
pub use crate::runtime::details::ServerDetailsRetriever;
pub use crate::runtime::dispatch::DispatchOutcome;
pub use crate::runtime::dispatch::DispatchStatus;
pub use crate::runtime::dispatch::Dispatcher;
pub use crate::runtime::dispatch::MethodRegistry;
pub use crate::runtime::dispatch::RegistryWiring;
pub use crate::runtime::memory::InMemoryLibrary;
pub use crate::runtime::memory::StaticFeatureGate;
