//! Player Events
//!
//! The session never touches presentation directly. Everything a view or a
//! playback surface needs to react to is queued as a [`PlayerEvent`] and
//! drained with [`PlayerSession::drain_events`](crate::PlayerSession::drain_events).

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use tocata_core::{Track, TrackKey};

/// Events emitted by the player session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A playlist finished loading
    PoolLoaded {
        /// Playlist name
        playlist: String,
        /// Playable tracks in the pool
        tracks: usize,
    },

    /// A playlist failed to load; the pool is now empty
    PoolLoadFailed {
        playlist: String,
        /// Human-readable reason, suitable for a toast
        reason: String,
    },

    /// The surface should load this track
    ///
    /// `cover` is the placeholder to show right away; the real cover follows
    /// as [`PlayerEvent::CoverResolved`] if one is found.
    TrackChanged {
        /// Position in play order
        index: usize,
        track: Track,
        cover: String,
        /// Whether the surface should start playing immediately
        autoplay: bool,
    },

    /// Real cover for the track that is still current
    CoverResolved { key: TrackKey, url: String },

    /// An autoplayed track never started; the session skipped it
    Stalled { index: usize, key: TrackKey },

    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// Shuffle was toggled
    ShuffleChanged { enabled: bool },

    /// Current track was added to or removed from favorites
    FavoriteToggled { key: TrackKey, favorite: bool },
}
