//! Tocata Artwork - cover image resolution
//!
//! Finds a display cover for a [`Track`](tocata_core::Track) through a
//! best-effort external catalog search, with caching and a fallback image.
//! Resolution never fails outward: every failure mode ends in the fallback.
//!
//! # Features
//!
//! - Embedded covers from playlist entries win outright
//! - Up to three search attempts, narrowest first
//! - Fuzzy candidate scoring with a minimum acceptance score
//! - Session cache keyed by [`TrackKey`](tocata_core::TrackKey), fallbacks included
//! - Pluggable search backend through [`CoverSearch`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tocata_artwork::{ArtworkConfig, CoverResolver, ItunesSearch};
//! use tocata_core::Track;
//!
//! # async fn demo() -> tocata_artwork::Result<()> {
//! let search = ItunesSearch::new()?;
//! let resolver = CoverResolver::new(Arc::new(search), ArtworkConfig::default());
//!
//! let track = Track::new("Wave", "Antonio Carlos Jobim", "https://cdn.example.com/wave.mp3");
//! let cover = resolver.resolve(&track, "Bossa Nova").await;
//! println!("cover: {}", cover);
//! # Ok(())
//! # }
//! ```

mod cache;
mod classify;
mod error;
mod resolver;
mod scoring;
mod search;
mod types;

// Re-export public API
pub use cache::CoverCache;
pub use classify::media_kind_for;
pub use error::{ArtworkError, Result};
pub use resolver::CoverResolver;
pub use scoring::{normalize_text, ScoreTarget};
pub use search::{CoverSearch, ItunesSearch, ITUNES_BASE_URL};
pub use types::{ArtworkConfig, MediaKind, SearchCandidate, SearchQuery, DEFAULT_FALLBACK_URL};
