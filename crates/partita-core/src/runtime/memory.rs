// crates/partita-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Library
// Description: Mutex-guarded library backend plus a static feature gate.
// Purpose: Back the repository seams for embedded servers and tests.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryLibrary`] implements every repository seam over one mutex-held
//! state block. Record-backed entity counts (`song`, `user`, `podcast`,
//! `podcast_episode`) track their maps automatically; every other count key
//! is seeded data. Removing a podcast cascades to its episodes, matching
//! what a real library backend does when a subscription goes away.
//!
//! A poisoned lock surfaces as a backend failure rather than a panic so the
//! dispatcher can render it like any other collaborator breakage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::details::ActionDates;
use crate::core::identifiers::PodcastEpisodeId;
use crate::core::identifiers::PodcastId;
use crate::core::identifiers::SongId;
use crate::core::identifiers::UserId;
use crate::core::resource::Feature;
use crate::core::resource::Podcast;
use crate::core::resource::PodcastEpisode;
use crate::core::resource::ResourceKind;
use crate::core::resource::Song;
use crate::core::resource::User;
use crate::interfaces::CatalogRepository;
use crate::interfaces::FeatureGate;
use crate::interfaces::LibraryError;
use crate::interfaces::PodcastEpisodeRepository;
use crate::interfaces::PodcastRepository;
use crate::interfaces::ServerCounters;
use crate::interfaces::SongRepository;
use crate::interfaces::UserRepository;

// ============================================================================
// SECTION: State
// ============================================================================

/// Mutable library contents guarded by the outer mutex.
#[derive(Default)]
struct LibraryState {
    /// Song records by identifier.
    songs: BTreeMap<SongId, Song>,
    /// Account records by identifier.
    users: BTreeMap<UserId, User>,
    /// Podcast subscription records by identifier.
    podcasts: BTreeMap<PodcastId, Podcast>,
    /// Podcast episode records by identifier.
    episodes: BTreeMap<PodcastEpisodeId, PodcastEpisode>,
    /// Last catalog maintenance timestamps.
    dates: ActionDates,
    /// Entity counts keyed by storage table name.
    counts: BTreeMap<String, u64>,
}

impl LibraryState {
    /// Rewrites the stored count for one record-backed kind from its map.
    fn synchronize_count(&mut self, kind: ResourceKind) {
        let total = match kind {
            ResourceKind::Song => self.songs.len(),
            ResourceKind::User => self.users.len(),
            ResourceKind::Podcast => self.podcasts.len(),
            ResourceKind::PodcastEpisode => self.episodes.len(),
        };
        let total = u64::try_from(total).unwrap_or(u64::MAX);
        self.counts.insert(kind.as_str().to_owned(), total);
    }
}

// ============================================================================
// SECTION: Library
// ============================================================================

/// Library backend holding every record in process memory.
#[derive(Default)]
pub struct InMemoryLibrary {
    /// Guarded library contents.
    state: Mutex<LibraryState>,
}

impl InMemoryLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state block.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    fn state(&self) -> Result<MutexGuard<'_, LibraryState>, LibraryError> {
        self.state
            .lock()
            .map_err(|_| LibraryError::Backend("library state lock poisoned".to_owned()))
    }

    /// Stores a song, replacing any record with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn insert_song(&self, song: Song) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.songs.insert(song.id, song);
        state.synchronize_count(ResourceKind::Song);
        Ok(())
    }

    /// Stores an account, replacing any record with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn insert_user(&self, user: User) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.users.insert(user.id, user);
        state.synchronize_count(ResourceKind::User);
        Ok(())
    }

    /// Stores a podcast subscription, replacing any record with the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn insert_podcast(&self, podcast: Podcast) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.podcasts.insert(podcast.id, podcast);
        state.synchronize_count(ResourceKind::Podcast);
        Ok(())
    }

    /// Stores a podcast episode, replacing any record with the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn insert_episode(&self, episode: PodcastEpisode) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.episodes.insert(episode.id, episode);
        state.synchronize_count(ResourceKind::PodcastEpisode);
        Ok(())
    }

    /// Overwrites the last-action dates.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn set_action_dates(&self, dates: ActionDates) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.dates = dates;
        Ok(())
    }

    /// Seeds one entity count key.
    ///
    /// Record-backed keys are rewritten on the next mutation of the matching
    /// map; use this for keys the library holds no records for.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Backend`] when the lock is poisoned.
    pub fn set_count(&self, key: &str, total: u64) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.counts.insert(key.to_owned(), total);
        Ok(())
    }
}

impl SongRepository for InMemoryLibrary {
    fn lookup(&self, id: SongId) -> Result<Option<Song>, LibraryError> {
        Ok(self.state()?.songs.get(&id).cloned())
    }
}

impl UserRepository for InMemoryLibrary {
    fn lookup(&self, id: UserId) -> Result<Option<User>, LibraryError> {
        Ok(self.state()?.users.get(&id).cloned())
    }

    fn valid_ids(&self) -> Result<Vec<UserId>, LibraryError> {
        Ok(self.state()?.users.keys().copied().collect())
    }
}

impl PodcastRepository for InMemoryLibrary {
    fn lookup(&self, id: PodcastId) -> Result<Option<Podcast>, LibraryError> {
        Ok(self.state()?.podcasts.get(&id).cloned())
    }

    fn remove(&self, id: PodcastId) -> Result<bool, LibraryError> {
        let mut state = self.state()?;
        let removed = state.podcasts.remove(&id).is_some();
        if removed {
            state.episodes.retain(|_, episode| episode.podcast != id);
            state.synchronize_count(ResourceKind::Podcast);
            state.synchronize_count(ResourceKind::PodcastEpisode);
        }
        Ok(removed)
    }
}

impl PodcastEpisodeRepository for InMemoryLibrary {
    fn lookup(&self, id: PodcastEpisodeId) -> Result<Option<PodcastEpisode>, LibraryError> {
        Ok(self.state()?.episodes.get(&id).cloned())
    }

    fn remove(&self, id: PodcastEpisodeId) -> Result<bool, LibraryError> {
        let mut state = self.state()?;
        let removed = state.episodes.remove(&id).is_some();
        if removed {
            state.synchronize_count(ResourceKind::PodcastEpisode);
        }
        Ok(removed)
    }
}

impl CatalogRepository for InMemoryLibrary {
    fn last_action_dates(&self) -> Result<ActionDates, LibraryError> {
        Ok(self.state()?.dates)
    }
}

impl ServerCounters for InMemoryLibrary {
    fn entity_counts(&self, refresh: bool) -> Result<BTreeMap<String, u64>, LibraryError> {
        let mut state = self.state()?;
        if refresh {
            state.synchronize_count(ResourceKind::Song);
            state.synchronize_count(ResourceKind::User);
            state.synchronize_count(ResourceKind::Podcast);
            state.synchronize_count(ResourceKind::PodcastEpisode);
        }
        Ok(state.counts.clone())
    }

    fn refresh_count(&self, kind: ResourceKind) -> Result<(), LibraryError> {
        let mut state = self.state()?;
        state.synchronize_count(kind);
        Ok(())
    }
}

// ============================================================================
// SECTION: Feature Gate
// ============================================================================

/// Feature gate answering from a fixed enablement set.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureGate {
    /// Features switched on at construction.
    enabled: BTreeSet<Feature>,
}

impl StaticFeatureGate {
    /// Creates a gate with the given features enabled.
    #[must_use]
    pub fn new<I>(enabled: I) -> Self
    where
        I: IntoIterator<Item = Feature>,
    {
        Self { enabled: enabled.into_iter().collect() }
    }
}

impl FeatureGate for StaticFeatureGate {
    fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }
}
