//! Favorite tracks
//!
//! An ordered list of [`TrackKey`]s. The core only toggles membership;
//! persisting the list across sessions is up to the host, which can use
//! [`Favorites::load`] and [`Favorites::save`] for a JSON file.

use crate::error::Result;
use crate::types::TrackKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Favorite track keys, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    keys: Vec<TrackKey>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &TrackKey) -> bool {
        self.keys.contains(key)
    }

    /// Add the key if absent, remove it if present.
    ///
    /// Returns whether the key is a favorite afterwards.
    pub fn toggle(&mut self, key: TrackKey) -> bool {
        if let Some(pos) = self.keys.iter().position(|k| *k == key) {
            self.keys.remove(pos);
            false
        } else {
            self.keys.push(key);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackKey> {
        self.keys.iter()
    }

    /// Load from a JSON file. A missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No favorites file, starting empty");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let favorites: Self = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), count = favorites.len(), "Loaded favorites");
        Ok(favorites)
    }

    /// Write as a JSON array, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        let key = TrackKey::new("artist|song");

        assert!(favorites.toggle(key.clone()));
        assert!(favorites.contains(&key));
        assert_eq!(favorites.len(), 1);

        assert!(!favorites.toggle(key.clone()));
        assert!(!favorites.contains(&key));
        assert!(favorites.is_empty());
    }

    #[test]
    fn order_is_insertion_order() {
        let mut favorites = Favorites::new();
        favorites.toggle("b".into());
        favorites.toggle("a".into());
        favorites.toggle("c".into());
        favorites.toggle("a".into());

        let keys: Vec<&str> = favorites.iter().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        let mut favorites = Favorites::new();
        favorites.toggle("x|one".into());
        favorites.toggle("y|two".into());
        favorites.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('['));

        let loaded = Favorites::load(&path).unwrap();
        assert_eq!(loaded, favorites);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Favorites::load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Favorites::load(&path).is_err());
    }
}
