// crates/partita-core/src/methods/podcast_episode_delete/tests.rs
// ============================================================================
// Module: Podcast Episode Delete Method Tests
// Description: Unit tests for the guarded episode removal ladder.
// Purpose: Validate rung order, short-circuiting, and mutation accounting.
// Dependencies: partita-core
// ============================================================================

//! ## Overview
//! Validates the full validation ladder: a disabled feature wins over a
//! missing parameter, an unresolved episode never reaches the deletion
//! policy, a denied caller never reaches the repository mutation, and a
//! successful removal refreshes exactly one entity count.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions use unwrap/expect for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use super::PodcastEpisodeDeleteMethod;
use crate::core::access::AccessLevel;
use crate::core::access::Session;
use crate::core::access::SessionGatekeeper;
use crate::core::details::ServerDetails;
use crate::core::error::ApiError;
use crate::core::identifiers::AuthToken;
use crate::core::identifiers::PodcastEpisodeId;
use crate::core::identifiers::PodcastId;
use crate::core::identifiers::SongId;
use crate::core::identifiers::UserId;
use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::request::Parameters;
use crate::core::resource::Feature;
use crate::core::resource::PodcastEpisode;
use crate::core::resource::ResourceKind;
use crate::core::version::ActionDescriptor;
use crate::interfaces::ApiOutput;
use crate::interfaces::DeletionPolicy;
use crate::interfaces::FeatureGate;
use crate::interfaces::Gatekeeper;
use crate::interfaces::LibraryError;
use crate::interfaces::OutputError;
use crate::interfaces::PodcastEpisodeRepository;
use crate::interfaces::ServerCounters;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

struct StubGate {
    enabled: bool,
}

impl FeatureGate for StubGate {
    fn is_enabled(&self, _feature: Feature) -> bool {
        self.enabled
    }
}

#[derive(Default)]
struct RecordingEpisodes {
    records: BTreeMap<PodcastEpisodeId, PodcastEpisode>,
    remove_result: bool,
    lookups: Mutex<Vec<PodcastEpisodeId>>,
    removals: Mutex<Vec<PodcastEpisodeId>>,
}

impl RecordingEpisodes {
    fn with_episode(episode: PodcastEpisode, remove_result: bool) -> Self {
        let mut records = BTreeMap::new();
        records.insert(episode.id, episode);
        Self { records, remove_result, ..Self::default() }
    }

    fn lookup_count(&self) -> usize {
        self.lookups.lock().expect("lookup log").len()
    }

    fn removal_count(&self) -> usize {
        self.removals.lock().expect("removal log").len()
    }
}

impl PodcastEpisodeRepository for RecordingEpisodes {
    fn lookup(&self, id: PodcastEpisodeId) -> Result<Option<PodcastEpisode>, LibraryError> {
        self.lookups.lock().expect("lookup log").push(id);
        Ok(self.records.get(&id).cloned())
    }

    fn remove(&self, id: PodcastEpisodeId) -> Result<bool, LibraryError> {
        self.removals.lock().expect("removal log").push(id);
        Ok(self.remove_result)
    }
}

#[derive(Default)]
struct RecordingPolicy {
    allow: bool,
    decisions: Mutex<Vec<(ResourceKind, u64)>>,
}

impl RecordingPolicy {
    fn decision_count(&self) -> usize {
        self.decisions.lock().expect("decision log").len()
    }
}

impl DeletionPolicy for RecordingPolicy {
    fn may_delete(&self, _gatekeeper: &dyn Gatekeeper, kind: ResourceKind, object_id: u64) -> bool {
        self.decisions.lock().expect("decision log").push((kind, object_id));
        self.allow
    }
}

#[derive(Default)]
struct RecordingCounters {
    fail: bool,
    refreshes: Mutex<Vec<ResourceKind>>,
}

impl RecordingCounters {
    fn refreshed(&self) -> Vec<ResourceKind> {
        self.refreshes.lock().expect("refresh log").clone()
    }
}

impl ServerCounters for RecordingCounters {
    fn entity_counts(&self, _refresh: bool) -> Result<BTreeMap<String, u64>, LibraryError> {
        Ok(BTreeMap::new())
    }

    fn refresh_count(&self, kind: ResourceKind) -> Result<(), LibraryError> {
        self.refreshes.lock().expect("refresh log").push(kind);
        if self.fail {
            return Err(LibraryError::Backend("count table offline".to_owned()));
        }
        Ok(())
    }
}

struct PlainOutput;

impl ApiOutput for PlainOutput {
    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn songs(
        &self,
        ids: &[SongId],
        _caller: UserId,
        _include_detail: bool,
        _share_context: bool,
    ) -> Result<Payload, OutputError> {
        Ok(Payload::from(format!("songs:{}", ids.len())))
    }

    fn users(&self, ids: &[UserId]) -> Result<Payload, OutputError> {
        Ok(Payload::from(format!("users:{}", ids.len())))
    }

    fn server_details(&self, _details: &ServerDetails) -> Result<Payload, OutputError> {
        Ok(Payload::from("details".to_owned()))
    }

    fn action_catalog(&self, entries: &[ActionDescriptor]) -> Result<Payload, OutputError> {
        Ok(Payload::from(format!("catalog:{}", entries.len())))
    }

    fn success(&self, message: &str) -> Payload {
        Payload::from(format!("success:{message}"))
    }

    fn empty_result(&self, kind: ResourceKind) -> Payload {
        Payload::from(format!("empty:{}", kind.as_str()))
    }

    fn error(&self, code: u32, message: &str) -> Payload {
        Payload::from(format!("error:{code}:{message}"))
    }
}

struct Harness {
    episodes: Arc<RecordingEpisodes>,
    policy: Arc<RecordingPolicy>,
    counters: Arc<RecordingCounters>,
    method: PodcastEpisodeDeleteMethod,
}

fn harness(
    feature_enabled: bool,
    episodes: RecordingEpisodes,
    policy: RecordingPolicy,
    counters: RecordingCounters,
) -> Harness {
    let episodes = Arc::new(episodes);
    let policy = Arc::new(policy);
    let counters = Arc::new(counters);
    let method = PodcastEpisodeDeleteMethod::new(
        Arc::new(StubGate { enabled: feature_enabled }),
        Arc::clone(&episodes) as Arc<dyn PodcastEpisodeRepository>,
        Arc::clone(&policy) as Arc<dyn DeletionPolicy>,
        Arc::clone(&counters) as Arc<dyn ServerCounters>,
    );
    Harness { episodes, policy, counters, method }
}

fn manager_gatekeeper() -> SessionGatekeeper {
    let user = UserId::from_raw(3).expect("user id");
    SessionGatekeeper::new(Session::new(user, AccessLevel::Manager))
}

fn delete_request(filter: Option<&str>) -> ApiRequest {
    let parameters = match filter {
        Some(value) => Parameters::from_pairs([("filter", value)]),
        None => Parameters::new(),
    };
    ApiRequest::new("podcast_episode_delete", parameters, AuthToken::new("token-1"))
}

fn sample_episode(id: u64) -> PodcastEpisode {
    PodcastEpisode {
        id: PodcastEpisodeId::from_raw(id).expect("episode id"),
        podcast: PodcastId::from_raw(1).expect("podcast id"),
        title: "Episode One".to_owned(),
    }
}

// ============================================================================
// SECTION: Ladder Tests
// ============================================================================

#[test]
fn disabled_feature_wins_over_missing_parameter() {
    let fixture = harness(
        false,
        RecordingEpisodes::default(),
        RecordingPolicy::default(),
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(None))
        .expect_err("expected disabled feature");

    assert_eq!(
        failure,
        MethodFailure::Api(ApiError::FunctionDisabled { feature: Feature::Podcasts })
    );
    assert_eq!(fixture.episodes.lookup_count(), 0);
    assert_eq!(fixture.policy.decision_count(), 0);
}

#[test]
fn missing_filter_stops_before_the_repository() {
    let fixture = harness(
        true,
        RecordingEpisodes::default(),
        RecordingPolicy::default(),
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(None))
        .expect_err("expected missing parameter");

    assert_eq!(
        failure,
        MethodFailure::Api(ApiError::RequestParamMissing { subject: "filter".to_owned() })
    );
    assert_eq!(fixture.episodes.lookup_count(), 0);
    assert_eq!(fixture.policy.decision_count(), 0);
}

#[test]
fn zero_filter_reports_empty_without_lookup() {
    let fixture = harness(
        true,
        RecordingEpisodes::default(),
        RecordingPolicy::default(),
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("0")))
        .expect_err("expected empty result");

    assert_eq!(failure, MethodFailure::Api(ApiError::ResultEmpty { subject: "0".to_owned() }));
    assert_eq!(fixture.episodes.lookup_count(), 0);
}

#[test]
fn unresolved_episode_never_reaches_the_policy() {
    let fixture = harness(
        true,
        RecordingEpisodes::default(),
        RecordingPolicy::default(),
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("12")))
        .expect_err("expected empty result");

    assert_eq!(failure, MethodFailure::Api(ApiError::ResultEmpty { subject: "12".to_owned() }));
    assert_eq!(fixture.episodes.lookup_count(), 1);
    assert_eq!(fixture.policy.decision_count(), 0);
    assert_eq!(fixture.episodes.removal_count(), 0);
}

#[test]
fn denied_caller_never_reaches_the_mutation() {
    let fixture = harness(
        true,
        RecordingEpisodes::with_episode(sample_episode(12), true),
        RecordingPolicy { allow: false, ..RecordingPolicy::default() },
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("12")))
        .expect_err("expected denial");

    assert_eq!(
        failure,
        MethodFailure::Api(ApiError::AccessDenied { required: AccessLevel::Manager })
    );
    let decisions = fixture.policy.decisions.lock().expect("decision log");
    assert_eq!(decisions.as_slice(), &[(ResourceKind::PodcastEpisode, 12)]);
    assert_eq!(fixture.episodes.removal_count(), 0);
    assert!(fixture.counters.refreshed().is_empty());
}

// ============================================================================
// SECTION: Mutation Tests
// ============================================================================

#[test]
fn successful_removal_refreshes_the_episode_count() {
    let fixture = harness(
        true,
        RecordingEpisodes::with_episode(sample_episode(12), true),
        RecordingPolicy { allow: true, ..RecordingPolicy::default() },
        RecordingCounters::default(),
    );

    let payload = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("12")))
        .expect("expected success payload");

    assert_eq!(payload, Payload::from("success:podcast_episode 12 deleted".to_owned()));
    assert_eq!(fixture.episodes.removal_count(), 1);
    assert_eq!(fixture.counters.refreshed(), vec![ResourceKind::PodcastEpisode]);
}

#[test]
fn refused_removal_maps_to_a_parameter_failure() {
    let fixture = harness(
        true,
        RecordingEpisodes::with_episode(sample_episode(12), false),
        RecordingPolicy { allow: true, ..RecordingPolicy::default() },
        RecordingCounters::default(),
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("12")))
        .expect_err("expected parameter failure");

    assert_eq!(
        failure,
        MethodFailure::Api(ApiError::RequestParamMissing { subject: "12".to_owned() })
    );
    assert!(fixture.counters.refreshed().is_empty());
}

#[test]
fn count_refresh_failure_travels_the_fatal_channel() {
    let fixture = harness(
        true,
        RecordingEpisodes::with_episode(sample_episode(12), true),
        RecordingPolicy { allow: true, ..RecordingPolicy::default() },
        RecordingCounters { fail: true, ..RecordingCounters::default() },
    );

    let failure = fixture
        .method
        .handle(&manager_gatekeeper(), &PlainOutput, &delete_request(Some("12")))
        .expect_err("expected fatal failure");

    assert!(matches!(failure, MethodFailure::Fatal(_)));
}
