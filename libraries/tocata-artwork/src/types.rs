use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Placeholder artwork shown while a cover resolves, and when none is found
pub const DEFAULT_FALLBACK_URL: &str = "https://i.ibb.co/n8LFzxmb/reprodutor-de-musica-2.png";

/// Which catalog section to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Song,
    Movie,
}

impl MediaKind {
    /// Entity name used by the search service
    pub fn entity(self) -> &'static str {
        match self {
            MediaKind::Song => "song",
            MediaKind::Movie => "movie",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity())
    }
}

/// One search attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text search term
    pub term: String,
    /// Catalog section
    pub kind: MediaKind,
    /// Maximum number of candidates to return
    pub limit: u32,
}

/// A search result reduced to the fields scoring needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub title: String,
    pub artist: String,
    /// Four-digit release year, when the service reported a date
    pub release_year: Option<String>,
    /// Thumbnail URL, usually with a `100x100` size segment
    pub artwork_url: Option<String>,
}

/// Cover resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkConfig {
    /// Image returned when nothing better is found
    pub fallback_url: String,
    /// Upper bound for a single search attempt
    pub search_timeout: Duration,
    /// Candidates requested per attempt
    pub result_limit: u32,
    /// Minimum score for a candidate to be accepted
    pub acceptance_threshold: i32,
    /// Edge length, in pixels, requested for accepted artwork
    pub artwork_size: u32,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            search_timeout: Duration::from_millis(4000),
            result_limit: 3,
            acceptance_threshold: 4,
            artwork_size: 300,
        }
    }
}
