// crates/partita-core/src/core/resource.rs
// ============================================================================
// Module: Partita Resources
// Description: Resource kinds, feature switches, and library record values.
// Purpose: Provide the domain value types handlers resolve and serialize.
// Dependencies: serde, crate::core::identifiers
// ============================================================================

//! ## Overview
//! Resource records are plain values looked up by numeric identifier. A lookup
//! that finds nothing returns `None`; no placeholder record is ever
//! constructed for a missing id. Mutations live on the repository seams, not
//! on the records themselves, so records can be freely cloned into payloads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PodcastEpisodeId;
use crate::core::identifiers::PodcastId;
use crate::core::identifiers::SongId;
use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Resource Kinds
// ============================================================================

/// Resource kind an API action operates on.
///
/// # Invariants
/// - Labels are stable wire values used in payloads and success messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A song in the library.
    Song,
    /// A server account.
    User,
    /// A subscribed podcast.
    Podcast,
    /// A single podcast episode.
    PodcastEpisode,
}

impl ResourceKind {
    /// Returns the singular label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Song => "song",
            Self::User => "user",
            Self::Podcast => "podcast",
            Self::PodcastEpisode => "podcast_episode",
        }
    }

    /// Returns the plural label used as the list key in payloads.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Song => "songs",
            Self::User => "users",
            Self::Podcast => "podcasts",
            Self::PodcastEpisode => "podcast_episodes",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Feature Switches
// ============================================================================

/// Optional subsystem that can be switched off by configuration.
///
/// # Invariants
/// - Keys are stable wire values used in `Enable: {key}` error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Podcast subscriptions and episodes.
    Podcasts,
    /// Public share links.
    Shares,
    /// Video playback.
    Videos,
}

impl Feature {
    /// Returns the configuration key for the feature.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Podcasts => "podcast",
            Self::Shares => "share",
            Self::Videos => "video",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// SECTION: Library Records
// ============================================================================

/// Song record resolved from the library.
///
/// # Invariants
/// - `id` matches the key the record was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song identifier.
    pub id: SongId,
    /// Display title.
    pub title: String,
    /// Artist name.
    pub artist: String,
    /// Album name.
    pub album: String,
    /// Genre label.
    pub genre: String,
    /// Duration in seconds.
    pub length_seconds: u32,
}

/// Account record resolved from the library.
///
/// # Invariants
/// - `id` matches the key the record was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
}

/// Podcast subscription record resolved from the library.
///
/// # Invariants
/// - `id` matches the key the record was stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    /// Podcast identifier.
    pub id: PodcastId,
    /// Display title.
    pub title: String,
    /// Source feed URL.
    pub feed_url: String,
}

/// Podcast episode record resolved from the library.
///
/// # Invariants
/// - `id` matches the key the record was stored under.
/// - `podcast` refers to the owning subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastEpisode {
    /// Episode identifier.
    pub id: PodcastEpisodeId,
    /// Owning podcast.
    pub podcast: PodcastId,
    /// Display title.
    pub title: String,
}
