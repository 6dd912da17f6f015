// crates/partita-output/src/json.rs
// ============================================================================
// Module: JSON Output Formatter
// Description: JSON rendering of songs, accounts, snapshots, and errors.
// Purpose: Implement the output port with deterministic JSON envelopes.
// Dependencies: partita-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The JSON formatter resolves identifiers through its own repository handles
//! and renders one envelope per result shape. List envelopes carry a
//! `total_count` alongside the plural-keyed array; an identifier with no
//! backing record is skipped rather than failing the whole payload. Stream
//! URLs are bound to the calling account and suppressed in share contexts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use partita_core::ActionDescriptor;
use partita_core::ApiOutput;
use partita_core::OutputError;
use partita_core::Payload;
use partita_core::ResourceKind;
use partita_core::ServerDetails;
use partita_core::SongId;
use partita_core::SongRepository;
use partita_core::UserId;
use partita_core::UserRepository;

// ============================================================================
// SECTION: Wire Entries
// ============================================================================

/// One song entry in a list envelope.
#[derive(Serialize)]
struct SongEntry {
    /// Song identifier rendered as a string.
    id: String,
    /// Display title.
    title: String,
    /// Artist name, present in detailed renderings.
    #[serde(skip_serializing_if = "Option::is_none")]
    artist: Option<String>,
    /// Album name, present in detailed renderings.
    #[serde(skip_serializing_if = "Option::is_none")]
    album: Option<String>,
    /// Genre label, present in detailed renderings.
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    /// Duration in seconds, present in detailed renderings.
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<u32>,
    /// Caller-bound stream URL, suppressed in share contexts.
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

/// Song list envelope.
#[derive(Serialize)]
struct SongList {
    /// Number of entries in the list.
    total_count: u64,
    /// Resolved song entries.
    songs: Vec<SongEntry>,
}

/// One account entry in a list envelope.
#[derive(Serialize)]
struct UserEntry {
    /// Account identifier rendered as a string.
    id: String,
    /// Login name.
    username: String,
}

/// Account list envelope.
#[derive(Serialize)]
struct UserList {
    /// Number of entries in the list.
    total_count: u64,
    /// Resolved account entries.
    users: Vec<UserEntry>,
}

/// Action catalog envelope.
#[derive(Serialize)]
struct MethodsList<'a> {
    /// Catalog entries, one per registered action.
    methods: &'a [ActionDescriptor],
}

// ============================================================================
// SECTION: Formatter
// ============================================================================

/// JSON implementation of the output port.
pub struct JsonOutput {
    /// Song record resolution.
    songs: Arc<dyn SongRepository>,
    /// Account record resolution.
    users: Arc<dyn UserRepository>,
}

impl JsonOutput {
    /// Creates a formatter around the repositories it resolves records from.
    #[must_use]
    pub fn new(songs: Arc<dyn SongRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { songs, users }
    }

    /// Serializes one envelope value.
    fn render<T: Serialize>(envelope: &T) -> Result<Payload, OutputError> {
        let bytes = serde_json::to_vec(envelope)
            .map_err(|error| OutputError::Serialization(error.to_string()))?;
        Ok(Payload::from(bytes))
    }
}

impl ApiOutput for JsonOutput {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn songs(
        &self,
        ids: &[SongId],
        caller: UserId,
        include_detail: bool,
        share_context: bool,
    ) -> Result<Payload, OutputError> {
        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(song) = self.songs.lookup(*id)? else {
                continue;
            };
            let url = (include_detail && !share_context)
                .then(|| format!("/play/song/{}?uid={}", song.id, caller));
            entries.push(SongEntry {
                id: song.id.to_string(),
                title: song.title,
                artist: include_detail.then_some(song.artist),
                album: include_detail.then_some(song.album),
                genre: include_detail.then_some(song.genre),
                time: include_detail.then_some(song.length_seconds),
                url,
            });
        }
        let total_count = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        Self::render(&SongList { total_count, songs: entries })
    }

    fn users(&self, ids: &[UserId]) -> Result<Payload, OutputError> {
        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(user) = self.users.lookup(*id)? else {
                continue;
            };
            entries.push(UserEntry { id: user.id.to_string(), username: user.username });
        }
        let total_count = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        Self::render(&UserList { total_count, users: entries })
    }

    fn server_details(&self, details: &ServerDetails) -> Result<Payload, OutputError> {
        Self::render(details)
    }

    fn action_catalog(&self, entries: &[ActionDescriptor]) -> Result<Payload, OutputError> {
        Self::render(&MethodsList { methods: entries })
    }

    fn success(&self, message: &str) -> Payload {
        let body = serde_json::json!({ "success": { "message": message } });
        Payload::from(body.to_string())
    }

    fn empty_result(&self, kind: ResourceKind) -> Payload {
        let mut envelope = Map::new();
        envelope.insert("total_count".to_owned(), Value::from(0_u64));
        envelope.insert(kind.plural().to_owned(), Value::Array(Vec::new()));
        Payload::from(Value::Object(envelope).to_string())
    }

    fn error(&self, code: u32, message: &str) -> Payload {
        let body = serde_json::json!({ "error": { "code": code, "message": message } });
        Payload::from(body.to_string())
    }
}

#[cfg(test)]
mod tests;
