//! Track pool
//!
//! A pool keeps the playlist's tracks in source order and a play order on
//! top of it: either the identity or a shuffled permutation. Indices handed
//! out by the sequencer are positions in the play order.

use crate::random::RandomSource;
use crate::shuffle::shuffle;
use tocata_core::{Track, TrackKey};

/// Tracks of the loaded playlist
#[derive(Debug, Clone, Default)]
pub struct Pool {
    playlist: String,
    source_order: Vec<Track>,
    play_order: Vec<usize>,
}

impl Pool {
    /// An empty pool, as left behind by a failed load
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pool in source order
    pub fn new(playlist: impl Into<String>, tracks: Vec<Track>) -> Self {
        let play_order = (0..tracks.len()).collect();
        Self {
            playlist: playlist.into(),
            source_order: tracks,
            play_order,
        }
    }

    pub fn playlist(&self) -> &str {
        &self.playlist
    }

    pub fn len(&self) -> usize {
        self.play_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.play_order.is_empty()
    }

    /// Track at a play-order position
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.play_order
            .get(index)
            .and_then(|&source| self.source_order.get(source))
    }

    pub fn key_at(&self, index: usize) -> Option<TrackKey> {
        self.track(index).map(Track::key)
    }

    /// First play-order position holding a track with this key
    pub fn position_of(&self, key: &TrackKey) -> Option<usize> {
        (0..self.len()).find(|&i| self.key_at(i).as_ref() == Some(key))
    }

    /// Tracks as fetched
    pub fn source_order(&self) -> &[Track] {
        &self.source_order
    }

    /// Play order as indices into [`Pool::source_order`]
    pub fn play_order(&self) -> &[usize] {
        &self.play_order
    }

    /// Tracks in play order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.play_order.iter().map(|&i| &self.source_order[i])
    }

    /// Replace the play order with a fresh shuffle of the source order.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        self.restore_source_order();
        shuffle(&mut self.play_order, rng);
    }

    /// Play in source order again.
    pub fn restore_source_order(&mut self) {
        self.play_order = (0..self.source_order.len()).collect();
    }
}
