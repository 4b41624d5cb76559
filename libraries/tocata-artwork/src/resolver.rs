//! Cover resolution
//!
//! Resolution order for a track:
//! 1. session cache, fallbacks included
//! 2. the cover embedded in the playlist entry
//! 3. up to three catalog searches, narrowest term first
//! 4. the fallback image
//!
//! Each search attempt is bounded by the configured timeout. Any failure in
//! an attempt (timeout, transport, status, payload, weak match) moves on to
//! the next attempt; nothing is reported to the caller.

use crate::cache::CoverCache;
use crate::classify::media_kind_for;
use crate::error::{ArtworkError, Result};
use crate::scoring::ScoreTarget;
use crate::search::CoverSearch;
use crate::types::{ArtworkConfig, MediaKind, SearchQuery};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tocata_core::{Track, TrackKey};
use tracing::{debug, info};

/// Resolves display covers for tracks.
///
/// Cheap to clone: clones share the search backend and the cache, so a
/// clone can be moved into a spawned task.
#[derive(Clone)]
pub struct CoverResolver {
    search: Arc<dyn CoverSearch>,
    cache: Arc<Mutex<CoverCache>>,
    config: Arc<ArtworkConfig>,
}

impl CoverResolver {
    pub fn new(search: Arc<dyn CoverSearch>, config: ArtworkConfig) -> Self {
        Self {
            search,
            cache: Arc::new(Mutex::new(CoverCache::new())),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ArtworkConfig {
        &self.config
    }

    /// The placeholder image.
    pub fn fallback_url(&self) -> &str {
        &self.config.fallback_url
    }

    /// Cached cover for a key, if resolution already finished for it.
    pub fn cached(&self, key: &TrackKey) -> Option<String> {
        self.lock_cache().get(key).map(str::to_string)
    }

    pub fn is_cached(&self, key: &TrackKey) -> bool {
        self.lock_cache().contains(key)
    }

    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Forget every resolved cover. Called when a playlist loads.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Resolve the cover for `track`, found in `playlist`.
    ///
    /// Always returns a URL; the fallback image when nothing better is found.
    pub async fn resolve(&self, track: &Track, playlist: &str) -> String {
        let key = track.key();

        if let Some(hit) = self.cached(&key) {
            debug!(key = %key, "Cover cache hit");
            return hit;
        }

        if let Some(embedded) = track.cover.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            self.store(key, embedded);
            return embedded.to_string();
        }

        let kind = media_kind_for(track, playlist);
        let target = ScoreTarget::from_track(track);

        for query in self.attempts(track, kind) {
            match self.attempt(&query, &target).await {
                Ok(Some(url)) => {
                    info!(key = %key, term = %query.term, url = %url, "Resolved cover");
                    self.store(key, &url);
                    return url;
                }
                Ok(None) => {
                    debug!(term = %query.term, "No acceptable cover candidate");
                }
                Err(e) => {
                    debug!(term = %query.term, error = %e, "Cover search attempt failed");
                }
            }
        }

        debug!(key = %key, "No cover found, using fallback");
        let fallback = self.config.fallback_url.clone();
        self.store(key, &fallback);
        fallback
    }

    /// Search terms, narrowest first. Attempts missing a field are skipped.
    fn attempts(&self, track: &Track, kind: MediaKind) -> Vec<SearchQuery> {
        let artist = track.artist.trim();
        let title = track.title.trim();
        let year = track.year.trim();

        let mut terms = Vec::with_capacity(3);
        if !artist.is_empty() && !title.is_empty() && !year.is_empty() {
            terms.push(format!("{} {} {}", artist, title, year));
        }
        if !artist.is_empty() && !title.is_empty() {
            terms.push(format!("{} {}", artist, title));
        }
        if !title.is_empty() {
            terms.push(title.to_string());
        }

        terms
            .into_iter()
            .map(|term| SearchQuery {
                term,
                kind,
                limit: self.config.result_limit,
            })
            .collect()
    }

    async fn attempt(&self, query: &SearchQuery, target: &ScoreTarget) -> Result<Option<String>> {
        let timeout = self.config.search_timeout;
        let candidates = tokio::time::timeout(timeout, self.search.search(query))
            .await
            .map_err(|_| ArtworkError::Timeout(timeout))??;

        let Some((best, score)) = target.best(&candidates) else {
            return Ok(None);
        };

        if score < self.config.acceptance_threshold {
            debug!(term = %query.term, score, title = %best.title, "Best candidate below threshold");
            return Ok(None);
        }

        Ok(best
            .artwork_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| self.resize(u)))
    }

    /// Ask for the configured size instead of the thumbnail.
    fn resize(&self, url: &str) -> String {
        let size = format!("{0}x{0}", self.config.artwork_size);
        for thumbnail in ["100x100", "60x60"] {
            if url.contains(thumbnail) {
                return url.replacen(thumbnail, &size, 1);
            }
        }
        url.to_string()
    }

    fn store(&self, key: TrackKey, url: &str) {
        self.lock_cache().insert(key, url);
    }

    fn lock_cache(&self) -> MutexGuard<'_, CoverCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
