use std::collections::HashMap;
use tocata_core::TrackKey;

/// Resolved cover URLs by track key.
///
/// Grows for the life of a session and is cleared when a playlist loads.
/// The fallback image is a legitimate value: a track that resolved to it is
/// not searched again.
#[derive(Debug, Clone, Default)]
pub struct CoverCache {
    entries: HashMap<TrackKey, String>,
}

impl CoverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TrackKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &TrackKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: TrackKey, url: impl Into<String>) {
        self.entries.insert(key, url.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
