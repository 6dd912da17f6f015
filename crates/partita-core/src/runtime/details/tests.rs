// crates/partita-core/src/runtime/details/tests.rs
// ============================================================================
// Module: Server Details Retriever Tests
// Description: Unit tests for status snapshot assembly.
// Purpose: Validate key translation, derived counts, and call discipline.
// Dependencies: partita-core
// ============================================================================

//! ## Overview
//! Validates the snapshot contract: `tag` surfaces as `genres`, `playlists`
//! sums stored playlists and saved searches, timestamps render as RFC 3339
//! in UTC, and each collaborator is consulted exactly once per retrieval.

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

use super::DetailsError;
use super::ServerDetailsRetriever;
use crate::core::details::ActionDates;
use crate::core::identifiers::AuthToken;
use crate::core::resource::ResourceKind;
use crate::core::version::ServerVersion;
use crate::interfaces::CatalogRepository;
use crate::interfaces::LibraryError;
use crate::interfaces::ServerCounters;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

struct CountingCatalog {
    dates: ActionDates,
    fail: bool,
    calls: Mutex<u32>,
}

impl CountingCatalog {
    fn new(dates: ActionDates) -> Self {
        Self { dates, fail: false, calls: Mutex::new(0) }
    }

    fn call_count(&self) -> u32 {
        *self.calls.lock().expect("catalog call counter")
    }
}

impl CatalogRepository for CountingCatalog {
    fn last_action_dates(&self) -> Result<ActionDates, LibraryError> {
        *self.calls.lock().expect("catalog call counter") += 1;
        if self.fail {
            return Err(LibraryError::Backend("catalog table offline".to_owned()));
        }
        Ok(self.dates)
    }
}

struct CountingCounters {
    counts: BTreeMap<String, u64>,
    calls: Mutex<Vec<bool>>,
}

impl CountingCounters {
    fn new(pairs: &[(&str, u64)]) -> Self {
        let counts = pairs.iter().map(|(key, total)| ((*key).to_owned(), *total)).collect();
        Self { counts, calls: Mutex::new(Vec::new()) }
    }

    fn recorded_flags(&self) -> Vec<bool> {
        self.calls.lock().expect("counter call log").clone()
    }
}

impl ServerCounters for CountingCounters {
    fn entity_counts(&self, refresh: bool) -> Result<BTreeMap<String, u64>, LibraryError> {
        self.calls.lock().expect("counter call log").push(refresh);
        Ok(self.counts.clone())
    }

    fn refresh_count(&self, _kind: ResourceKind) -> Result<(), LibraryError> {
        Ok(())
    }
}

fn retriever(
    catalog: Arc<CountingCatalog>,
    counters: Arc<CountingCounters>,
) -> ServerDetailsRetriever {
    ServerDetailsRetriever::new(catalog, counters, ServerVersion::current())
}

// ============================================================================
// SECTION: Snapshot Tests
// ============================================================================

#[test]
fn snapshot_translates_keys_and_derives_playlists() {
    let catalog = Arc::new(CountingCatalog::new(ActionDates::new(11_111, 22_222, 33_333)));
    let counters = Arc::new(CountingCounters::new(&[
        ("tag", 44),
        ("playlist", 55),
        ("search", 77),
        ("song", 10),
        ("podcast_episode", 6),
    ]));
    let retriever = retriever(Arc::clone(&catalog), Arc::clone(&counters));

    let details = retriever.retrieve(&AuthToken::new("abc")).expect("snapshot");

    assert_eq!(details.auth.as_str(), "abc");
    assert_eq!(details.api, "1.6.0");
    assert_eq!(details.update, "1970-01-01T03:05:11Z");
    assert_eq!(details.add, "1970-01-01T06:10:22Z");
    assert_eq!(details.clean, "1970-01-01T09:15:33Z");
    assert_eq!(details.genres, 44);
    assert_eq!(details.playlists, 132);
    assert_eq!(details.songs, 10);
    assert_eq!(details.podcast_episodes, 6);
    assert_eq!(details.albums, 0);
    assert_eq!(details.labels, 0);
}

#[test]
fn retrieve_consults_each_collaborator_exactly_once() {
    let catalog = Arc::new(CountingCatalog::new(ActionDates::new(1, 2, 3)));
    let counters = Arc::new(CountingCounters::new(&[]));
    let retriever = retriever(Arc::clone(&catalog), Arc::clone(&counters));

    retriever.retrieve(&AuthToken::new("abc")).expect("snapshot");

    assert_eq!(catalog.call_count(), 1);
    assert_eq!(counters.recorded_flags(), vec![false]);
}

#[test]
fn repeated_retrievals_are_identical_for_unchanged_data() {
    let catalog = Arc::new(CountingCatalog::new(ActionDates::new(11_111, 22_222, 33_333)));
    let counters = Arc::new(CountingCounters::new(&[("song", 10)]));
    let retriever = retriever(catalog, counters);

    let first = retriever.retrieve(&AuthToken::new("abc")).expect("first snapshot");
    let second = retriever.retrieve(&AuthToken::new("abc")).expect("second snapshot");

    assert_eq!(first, second);
}

// ============================================================================
// SECTION: Failure Tests
// ============================================================================

#[test]
fn collaborator_failure_surfaces_as_library_error() {
    let catalog =
        Arc::new(CountingCatalog { fail: true, ..CountingCatalog::new(ActionDates::new(1, 2, 3)) });
    let counters = Arc::new(CountingCounters::new(&[]));
    let retriever = retriever(catalog, counters);

    let error = retriever.retrieve(&AuthToken::new("abc")).expect_err("expected failure");

    assert!(matches!(error, DetailsError::Library(_)));
}

#[test]
fn unrenderable_timestamp_surfaces_as_timestamp_error() {
    let catalog = Arc::new(CountingCatalog::new(ActionDates::new(i64::MAX, 2, 3)));
    let counters = Arc::new(CountingCounters::new(&[]));
    let retriever = retriever(catalog, counters);

    let error = retriever.retrieve(&AuthToken::new("abc")).expect_err("expected failure");

    assert!(matches!(error, DetailsError::Timestamp(_)));
}
