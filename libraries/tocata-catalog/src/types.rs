//! Types for the catalog client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of the playlist index document
    pub index_url: String,
    /// Whole-request timeout for index and playlist fetches
    pub request_timeout: Duration,
}

impl CatalogConfig {
    /// Create a config for the given index URL with default timeouts.
    pub fn new(index_url: impl Into<String>) -> Self {
        Self {
            index_url: index_url.into(),
            request_timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// One playlist listed in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Display name, also the lookup key
    pub name: String,
    /// Absolute URL of the playlist document
    pub url: String,
}

/// Playlist index in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistIndex {
    entries: Vec<PlaylistEntry>,
}

impl PlaylistIndex {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    /// Look up a playlist by exact name.
    pub fn get(&self, name: &str) -> Option<&PlaylistEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn first(&self) -> Option<&PlaylistEntry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaylistEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
