//! Player session
//!
//! [`PlayerSession`] owns the pool, the sequencer, the stall watchdog, the
//! cover resolver and the favorites list, and is the only place where
//! their effects meet. Hosts drive it with user intents (`next`, `prev`,
//! `toggle_shuffle`, playlist selection) and with reports from the playback
//! surface (`on_playback_started`, `on_paused`, `on_track_ended`), and
//! render whatever [`PlayerEvent`]s it queues.

use crate::cover::{CoverJob, CoverPurpose, ResolvedCover};
use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::pool::Pool;
use crate::random::RandomSource;
use crate::sequencer::{Sequencer, SequencerSnapshot};
use crate::types::{PlaybackState, SessionConfig, SurfaceStatus};
use crate::watchdog::{StallAlarm, StallAlarms, StallWatchdog};
use serde::Serialize;
use std::sync::Arc;
use tocata_artwork::CoverResolver;
use tocata_core::{normalize_entries, Favorites, PlaylistSource, Track};
use tracing::{debug, info, trace, warn};

/// Debug view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub playlist: Option<String>,
    pub pool_len: usize,
    pub state: PlaybackState,
    pub watchdog_armed: bool,
    pub favorites: usize,
    #[serde(flatten)]
    pub sequencer: SequencerSnapshot,
}

/// A single-track player
pub struct PlayerSession {
    config: SessionConfig,
    source: Arc<dyn PlaylistSource>,
    resolver: CoverResolver,
    rng: Box<dyn RandomSource>,
    pool: Pool,
    sequencer: Sequencer,
    watchdog: StallWatchdog,
    favorites: Favorites,
    state: PlaybackState,
    current_playlist: Option<String>,
    pending_events: Vec<PlayerEvent>,
}

impl PlayerSession {
    /// Create a session with an empty pool.
    ///
    /// The returned [`StallAlarms`] must be polled by the host and each
    /// alarm passed to [`PlayerSession::on_stall_alarm`].
    pub fn new(
        config: SessionConfig,
        source: Arc<dyn PlaylistSource>,
        resolver: CoverResolver,
        rng: Box<dyn RandomSource>,
    ) -> (Self, StallAlarms) {
        let (watchdog, alarms) = StallWatchdog::new(config.stall_timeout);
        let session = Self {
            sequencer: Sequencer::new(&config),
            config,
            source,
            resolver,
            rng,
            pool: Pool::empty(),
            watchdog,
            favorites: Favorites::new(),
            state: PlaybackState::Stopped,
            current_playlist: None,
            pending_events: Vec::new(),
        };
        (session, alarms)
    }

    /// Start with a previously persisted favorites list.
    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ===== Playlists =====

    /// Playlist names from the source, in index order.
    pub async fn playlists(&self) -> Result<Vec<String>> {
        Ok(self.source.playlist_names().await?)
    }

    /// Select the first playlist of the index.
    pub async fn start(&mut self) -> Result<usize> {
        let names = self.playlists().await?;
        let first = names.into_iter().next().ok_or(PlaybackError::NoPlaylists)?;
        self.switch_to(&first).await
    }

    /// Switch to a playlist by name and cue a random track without playing it.
    ///
    /// Returns the cued index.
    pub async fn select_playlist(&mut self, name: &str) -> Result<usize> {
        let names = self.playlists().await?;
        if !names.iter().any(|n| n == name) {
            return Err(PlaybackError::UnknownPlaylist(name.to_string()));
        }
        self.switch_to(name).await
    }

    async fn switch_to(&mut self, name: &str) -> Result<usize> {
        self.load_pool(name).await?;

        let index = self.rng.index(self.pool.len());
        self.sequencer.set_index(index);
        self.load_current(false);
        Ok(index)
    }

    /// Replace the pool with the named playlist.
    ///
    /// Cancels any armed watchdog, forgets cycle and recent-play history,
    /// and clears the cover cache before fetching. On failure the pool is
    /// left empty. On success the position is reset to the first track of
    /// the play order, which is shuffled when shuffle is on.
    pub async fn load_pool(&mut self, playlist: &str) -> Result<usize> {
        self.watchdog.disarm();
        self.sequencer.reset();
        self.resolver.clear_cache();
        self.set_state(PlaybackState::Stopped);
        self.current_playlist = Some(playlist.to_string());

        let entries = match self.source.fetch_entries(playlist).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(playlist = %playlist, error = %e, "Failed to fetch playlist");
                return Err(self.fail_load(playlist, e.into()));
            }
        };

        let tracks = normalize_entries(&entries);
        if tracks.is_empty() {
            warn!(playlist = %playlist, entries = entries.len(), "Playlist has no playable tracks");
            return Err(self.fail_load(
                playlist,
                PlaybackError::EmptyPool {
                    playlist: playlist.to_string(),
                },
            ));
        }

        let mut pool = Pool::new(playlist, tracks);
        if self.sequencer.is_shuffled() {
            pool.shuffle(self.rng.as_mut());
        }
        self.pool = pool;

        info!(
            playlist = %playlist,
            tracks = self.pool.len(),
            shuffled = self.sequencer.is_shuffled(),
            "Loaded playlist"
        );
        self.pending_events.push(PlayerEvent::PoolLoaded {
            playlist: playlist.to_string(),
            tracks: self.pool.len(),
        });

        Ok(self.pool.len())
    }

    fn fail_load(&mut self, playlist: &str, error: PlaybackError) -> PlaybackError {
        self.pool = Pool::empty();
        self.pending_events.push(PlayerEvent::PoolLoadFailed {
            playlist: playlist.to_string(),
            reason: error.to_string(),
        });
        error
    }

    // ===== Navigation =====

    /// Advance and load the new current track. `None` for an empty pool.
    pub fn next(&mut self, autoplay: bool) -> Option<usize> {
        self.watchdog.disarm();
        let index = self.sequencer.next(&self.pool, self.rng.as_mut())?;
        self.load_current(autoplay);
        Some(index)
    }

    /// Step back and load the new current track. `None` for an empty pool.
    pub fn prev(&mut self, autoplay: bool) -> Option<usize> {
        self.watchdog.disarm();
        let index = self.sequencer.prev(&self.pool, self.rng.as_mut())?;
        self.load_current(autoplay);
        Some(index)
    }

    /// Play the cued track. Returns false when nothing is loaded or it is
    /// already playing.
    pub fn play(&mut self) -> bool {
        if self.current_track().is_none() || self.state == PlaybackState::Playing {
            return false;
        }
        self.set_state(PlaybackState::Loading);
        self.watchdog.arm();
        true
    }

    /// Flip shuffle, keeping the current track. Returns whether shuffle is on.
    pub fn toggle_shuffle(&mut self) -> bool {
        let enabled = self
            .sequencer
            .toggle_shuffle(&mut self.pool, self.rng.as_mut());
        debug!(enabled, index = self.sequencer.index(), "Shuffle toggled");
        self.pending_events
            .push(PlayerEvent::ShuffleChanged { enabled });
        enabled
    }

    /// Hand the current track to the surface; arm the watchdog for autoplay.
    fn load_current(&mut self, autoplay: bool) {
        let index = self.sequencer.index();
        let Some(track) = self.pool.track(index).cloned() else {
            return;
        };

        debug!(index, title = %track.title, artist = %track.artist, autoplay, "Loading track");

        self.set_state(if autoplay {
            PlaybackState::Loading
        } else {
            PlaybackState::Stopped
        });
        self.pending_events.push(PlayerEvent::TrackChanged {
            index,
            track,
            cover: self.resolver.fallback_url().to_string(),
            autoplay,
        });

        if autoplay {
            self.watchdog.arm();
        }
    }

    // ===== Surface reports =====

    /// The surface reports that the current track genuinely started playing.
    pub fn on_playback_started(&mut self) {
        self.watchdog.disarm();
        if let Some(key) = self.sequencer.record_start(&self.pool) {
            trace!(key = %key, "Recorded start");
        }
        self.set_state(PlaybackState::Playing);
    }

    /// The surface paused.
    pub fn on_paused(&mut self) {
        self.watchdog.disarm();
        if !self.pool.is_empty() {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// The current track played to the end.
    ///
    /// Returns a cover prefetch for a likely next track (when it is not
    /// cached yet), then advances with autoplay.
    pub fn on_track_ended(&mut self) -> Option<CoverJob> {
        let prefetch = self.prefetch_job();
        self.next(true);
        prefetch
    }

    /// A stall timer elapsed. Skips to the next track when the alarm is
    /// current and `status` shows the track never got going.
    ///
    /// Returns whether the session skipped.
    pub fn on_stall_alarm(&mut self, alarm: StallAlarm, status: SurfaceStatus) -> bool {
        if !self.watchdog.accept(alarm) {
            trace!(generation = alarm.generation, "Ignoring stale stall alarm");
            return false;
        }

        if !status.is_stalled() {
            debug!("Stall timer elapsed but playback is progressing");
            return false;
        }

        let index = self.sequencer.index();
        if let Some(key) = self.pool.key_at(index) {
            warn!(index, key = %key, "Track did not start in time, skipping");
            self.pending_events.push(PlayerEvent::Stalled { index, key });
        }

        self.next(true);
        true
    }

    // ===== Covers =====

    /// Cover lookup for the current track.
    pub fn cover_job(&self) -> Option<CoverJob> {
        let track = self.current_track()?.clone();
        Some(CoverJob::new(
            self.resolver.clone(),
            track,
            self.pool.playlist(),
            CoverPurpose::Current,
        ))
    }

    /// Cover lookup for the predicted next track, unless already cached.
    pub fn prefetch_job(&mut self) -> Option<CoverJob> {
        let index = self
            .sequencer
            .predict_next(&self.pool, self.rng.as_mut())?;
        let track = self.pool.track(index)?.clone();

        if self.resolver.is_cached(&track.key()) {
            return None;
        }

        Some(CoverJob::new(
            self.resolver.clone(),
            track,
            self.pool.playlist(),
            CoverPurpose::Prefetch,
        ))
    }

    /// Apply a finished lookup. Emits [`PlayerEvent::CoverResolved`] only for
    /// a real cover of the track that is still current.
    ///
    /// Returns whether the cover was applied.
    pub fn apply_cover(&mut self, resolved: ResolvedCover) -> bool {
        if resolved.purpose == CoverPurpose::Prefetch {
            return false;
        }

        let still_current = self
            .current_track()
            .is_some_and(|track| track.key() == resolved.key);
        if !still_current {
            debug!(key = %resolved.key, "Discarding cover for a track that is no longer current");
            return false;
        }

        if resolved.url == self.resolver.fallback_url() {
            return false;
        }

        self.pending_events.push(PlayerEvent::CoverResolved {
            key: resolved.key,
            url: resolved.url,
        });
        true
    }

    // ===== Favorites =====

    /// Toggle the current track's favorite flag. `None` with nothing loaded.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let key = self.current_track()?.key();
        let favorite = self.favorites.toggle(key.clone());
        info!(key = %key, favorite, "Favorite toggled");
        self.pending_events
            .push(PlayerEvent::FavoriteToggled { key, favorite });
        Some(favorite)
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current_track()
            .is_some_and(|track| self.favorites.contains(&track.key()))
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    // ===== Queries =====

    pub fn current_track(&self) -> Option<&Track> {
        self.pool.track(self.sequencer.index())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_track().map(|_| self.sequencer.index())
    }

    pub fn current_playlist(&self) -> Option<&str> {
        self.current_playlist.as_deref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_shuffled(&self) -> bool {
        self.sequencer.is_shuffled()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn resolver(&self) -> &CoverResolver {
        &self.resolver
    }

    pub fn is_watchdog_armed(&self) -> bool {
        self.watchdog.is_armed()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            playlist: self.current_playlist.clone(),
            pool_len: self.pool.len(),
            state: self.state,
            watchdog_armed: self.watchdog.is_armed(),
            favorites: self.favorites.len(),
            sequencer: self.sequencer.snapshot(),
        }
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }
}
