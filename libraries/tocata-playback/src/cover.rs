//! Detached cover lookups
//!
//! A [`CoverJob`] owns everything it needs, so a driver can spawn it and
//! keep driving the session. The result comes back through
//! [`PlayerSession::apply_cover`](crate::PlayerSession::apply_cover), which
//! drops it if the track is no longer current.

use tocata_artwork::CoverResolver;
use tocata_core::{Track, TrackKey};

/// Why a cover is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverPurpose {
    /// For the track that was current when the job was created
    Current,
    /// Warming the cache for a likely next track
    Prefetch,
}

/// One cover lookup, ready to run on any task
#[derive(Clone)]
pub struct CoverJob {
    resolver: CoverResolver,
    track: Track,
    playlist: String,
    purpose: CoverPurpose,
}

/// Outcome of a [`CoverJob`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCover {
    pub key: TrackKey,
    pub url: String,
    pub purpose: CoverPurpose,
}

impl CoverJob {
    pub fn new(
        resolver: CoverResolver,
        track: Track,
        playlist: impl Into<String>,
        purpose: CoverPurpose,
    ) -> Self {
        Self {
            resolver,
            track,
            playlist: playlist.into(),
            purpose,
        }
    }

    pub fn key(&self) -> TrackKey {
        self.track.key()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn purpose(&self) -> CoverPurpose {
        self.purpose
    }

    pub async fn run(self) -> ResolvedCover {
        let url = self.resolver.resolve(&self.track, &self.playlist).await;
        ResolvedCover {
            key: self.track.key(),
            url,
            purpose: self.purpose,
        }
    }
}
