// crates/partita-output/src/json/tests.rs
// ============================================================================
// Module: JSON Output Formatter Tests
// Description: Unit tests for JSON envelope rendering.
// Purpose: Validate envelope shapes, detail flags, and determinism.
// Dependencies: partita-core, partita-output, serde_json
// ============================================================================

//! ## Overview
//! Validates the JSON wire contract: list envelopes carry `total_count`,
//! detail and share flags control song fields independently, and identical
//! inputs render byte-identical payloads.

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

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;

use partita_core::ActionDescriptor;
use partita_core::ApiOutput;
use partita_core::AuthToken;
use partita_core::InMemoryLibrary;
use partita_core::Payload;
use partita_core::ProtocolVersion;
use partita_core::ResourceKind;
use partita_core::ServerDetails;
use partita_core::Song;
use partita_core::SongId;
use partita_core::SongRepository;
use partita_core::User;
use partita_core::UserId;
use partita_core::UserRepository;

use super::JsonOutput;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn seeded_library() -> Arc<InMemoryLibrary> {
    let library = Arc::new(InMemoryLibrary::new());
    library
        .insert_song(Song {
            id: SongId::from_raw(7).expect("song id"),
            title: "Sarabande".to_owned(),
            artist: "The Partita Ensemble".to_owned(),
            album: "Suites".to_owned(),
            genre: "Baroque".to_owned(),
            length_seconds: 241,
        })
        .expect("insert song");
    library
        .insert_user(User {
            id: UserId::from_raw(1).expect("user id"),
            username: "elena".to_owned(),
        })
        .expect("insert user");
    library
        .insert_user(User {
            id: UserId::from_raw(2).expect("user id"),
            username: "marius".to_owned(),
        })
        .expect("insert user");
    library
}

fn output_over(library: &Arc<InMemoryLibrary>) -> JsonOutput {
    JsonOutput::new(
        Arc::clone(library) as Arc<dyn SongRepository>,
        Arc::clone(library) as Arc<dyn UserRepository>,
    )
}

fn parse(payload: &Payload) -> Value {
    serde_json::from_slice(payload.as_bytes()).expect("json payload")
}

fn caller() -> UserId {
    UserId::from_raw(1).expect("caller id")
}

fn song_ids(raws: &[u64]) -> Vec<SongId> {
    raws.iter().map(|raw| SongId::from_raw(*raw).expect("song id")).collect()
}

// ============================================================================
// SECTION: Song Envelope Tests
// ============================================================================

#[test]
fn detailed_song_carries_extended_fields_and_stream_url() {
    let library = seeded_library();
    let output = output_over(&library);

    let payload = output.songs(&song_ids(&[7]), caller(), true, false).expect("payload");

    assert_eq!(
        parse(&payload),
        json!({
            "total_count": 1,
            "songs": [{
                "id": "7",
                "title": "Sarabande",
                "artist": "The Partita Ensemble",
                "album": "Suites",
                "genre": "Baroque",
                "time": 241,
                "url": "/play/song/7?uid=1",
            }],
        })
    );
}

#[test]
fn base_song_carries_only_identity_fields() {
    let library = seeded_library();
    let output = output_over(&library);

    let payload = output.songs(&song_ids(&[7]), caller(), false, false).expect("payload");

    assert_eq!(
        parse(&payload),
        json!({ "total_count": 1, "songs": [{ "id": "7", "title": "Sarabande" }] })
    );
}

#[test]
fn share_context_suppresses_the_stream_url() {
    let library = seeded_library();
    let output = output_over(&library);

    let payload = output.songs(&song_ids(&[7]), caller(), true, true).expect("payload");

    let body = parse(&payload);
    let entry = &body["songs"][0];
    assert_eq!(entry["artist"], json!("The Partita Ensemble"));
    assert!(entry.get("url").is_none());
}

#[test]
fn unresolved_identifiers_are_skipped() {
    let library = seeded_library();
    let output = output_over(&library);

    let payload = output.songs(&song_ids(&[7, 9]), caller(), false, false).expect("payload");

    let body = parse(&payload);
    assert_eq!(body["total_count"], json!(1));
    assert_eq!(body["songs"].as_array().map(Vec::len), Some(1));
}

#[test]
fn identical_song_requests_render_identical_payloads() {
    let library = seeded_library();
    let output = output_over(&library);

    let first = output.songs(&song_ids(&[7]), caller(), true, false).expect("first");
    let second = output.songs(&song_ids(&[7]), caller(), true, false).expect("second");

    assert_eq!(first, second);
}

// ============================================================================
// SECTION: Account Envelope Tests
// ============================================================================

#[test]
fn users_render_with_string_identifiers() {
    let library = seeded_library();
    let output = output_over(&library);
    let ids = vec![UserId::from_raw(1).expect("user id"), UserId::from_raw(2).expect("user id")];

    let payload = output.users(&ids).expect("payload");

    assert_eq!(
        parse(&payload),
        json!({
            "total_count": 2,
            "users": [
                { "id": "1", "username": "elena" },
                { "id": "2", "username": "marius" },
            ],
        })
    );
}

// ============================================================================
// SECTION: Snapshot and Catalog Tests
// ============================================================================

#[test]
fn server_details_render_as_a_flat_object() {
    let library = seeded_library();
    let output = output_over(&library);
    let details = ServerDetails {
        auth: AuthToken::new("token-99"),
        api: "1.6.0".to_owned(),
        update: "1970-01-01T03:05:11Z".to_owned(),
        add: "1970-01-01T06:10:22Z".to_owned(),
        clean: "1970-01-01T09:15:33Z".to_owned(),
        songs: 10,
        albums: 3,
        artists: 4,
        genres: 44,
        playlists: 132,
        users: 2,
        catalogs: 1,
        videos: 0,
        podcasts: 1,
        podcast_episodes: 6,
        shares: 0,
        licenses: 0,
        live_streams: 0,
        labels: 0,
    };

    let payload = output.server_details(&details).expect("payload");

    let body = parse(&payload);
    assert_eq!(body["auth"], json!("token-99"));
    assert_eq!(body["api"], json!("1.6.0"));
    assert_eq!(body["update"], json!("1970-01-01T03:05:11Z"));
    assert_eq!(body["genres"], json!(44));
    assert_eq!(body["playlists"], json!(132));
    assert_eq!(body["podcast_episodes"], json!(6));
}

#[test]
fn action_catalog_renders_under_the_methods_key() {
    let library = seeded_library();
    let output = output_over(&library);
    let entries = vec![ActionDescriptor::new("ping", ProtocolVersion::new(100_000))];

    let payload = output.action_catalog(&entries).expect("payload");

    assert_eq!(
        parse(&payload),
        json!({ "methods": [{ "action": "ping", "minimum_version": 100_000 }] })
    );
}

// ============================================================================
// SECTION: Message Envelope Tests
// ============================================================================

#[test]
fn success_and_error_envelopes_are_stable() {
    let library = seeded_library();
    let output = output_over(&library);

    assert_eq!(
        parse(&output.success("podcast 3 deleted")),
        json!({ "success": { "message": "podcast 3 deleted" } })
    );
    assert_eq!(
        parse(&output.error(4704, "Not Found: 41")),
        json!({ "error": { "code": 4704, "message": "Not Found: 41" } })
    );
}

#[test]
fn empty_result_distinguishes_itself_from_an_error() {
    let library = seeded_library();
    let output = output_over(&library);

    assert_eq!(
        parse(&output.empty_result(ResourceKind::User)),
        json!({ "total_count": 0, "users": [] })
    );
    assert_eq!(
        parse(&output.empty_result(ResourceKind::PodcastEpisode)),
        json!({ "total_count": 0, "podcast_episodes": [] })
    );
}

#[test]
fn content_type_is_json() {
    let library = seeded_library();
    let output = output_over(&library);

    assert_eq!(output.content_type(), "application/json");
}
