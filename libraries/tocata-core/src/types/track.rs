//! Track and track identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical, normalized playable item.
///
/// Produced by [`normalize`](crate::normalize) from whatever shape a playlist
/// document uses. `year` and `kind` are empty strings when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,
    /// Display artist
    pub artist: String,
    /// Stream location. Pools only ever hold tracks with a non-empty URL.
    pub url: String,
    /// Release year, free-form
    #[serde(default)]
    pub year: String,
    /// Category hint such as "movie" or "song"
    #[serde(default)]
    pub kind: String,
    /// Cover image embedded in the playlist entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl Track {
    /// Create a track with the three display fields.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Whether this track can be handed to a playback surface.
    pub fn is_playable(&self) -> bool {
        !self.url.is_empty()
    }

    /// Derive the coarse identity of this track.
    ///
    /// Artist and title, trimmed and lowercased, when both are present.
    /// Otherwise the URL. Otherwise the JSON form of the whole track.
    pub fn key(&self) -> TrackKey {
        let artist = self.artist.trim();
        let title = self.title.trim();

        if !artist.is_empty() && !title.is_empty() {
            return TrackKey(format!(
                "{}|{}",
                artist.to_lowercase(),
                title.to_lowercase()
            ));
        }

        if !self.url.is_empty() {
            return TrackKey(self.url.clone());
        }

        TrackKey(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Coarse track identity.
///
/// Two entries for the same song (same artist and title) share a key even
/// when their URLs differ. The play cycle, cover cache and favorites all
/// index by this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackKey(String);

impl TrackKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrackKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}
