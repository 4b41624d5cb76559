//! Error types for playback management

use thiserror::Error;
use tocata_core::FetchError;

/// Playback errors
///
/// Only pool loading can fail. Stalls and cover lookups recover locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Playlist index or document could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Playlist yielded zero playable tracks
    #[error("Playlist {playlist} has no playable tracks")]
    EmptyPool { playlist: String },

    /// Requested playlist is not in the index
    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),

    /// Playlist index lists nothing
    #[error("Playlist index is empty")]
    NoPlaylists,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
