//! Playlist entry normalization
//!
//! Playlist documents are written by hand and disagree on field names.
//! Every accepted spelling is mapped onto [`Track`]; entries that cannot be
//! played are filtered out by [`normalize_entries`].

use crate::types::Track;
use serde_json::{Map, Value};
use tracing::debug;

const TITLE_FIELDS: &[&str] = &["title", "name", "track"];
const ARTIST_FIELDS: &[&str] = &["artist", "artista", "albumArtist", "author"];
const URL_FIELDS: &[&str] = &["url", "src", "stream", "file"];
const YEAR_FIELDS: &[&str] = &["year", "releaseYear", "ano"];
const KIND_FIELDS: &[&str] = &["type", "category"];
const COVER_FIELDS: &[&str] = &["cover", "artwork", "image"];

/// Artist assigned to bare-string entries.
pub const UNKNOWN_ARTIST: &str = "unknown";

/// Map one raw playlist entry onto a [`Track`].
///
/// Never fails. A bare string is used as both title and URL. Anything that
/// is neither a string nor an object yields an empty, unplayable track.
pub fn normalize(raw: &Value) -> Track {
    match raw {
        Value::String(s) => Track {
            title: s.clone(),
            artist: UNKNOWN_ARTIST.to_string(),
            url: s.clone(),
            ..Track::default()
        },
        Value::Object(map) => Track {
            title: pick(map, TITLE_FIELDS).unwrap_or_default(),
            artist: pick(map, ARTIST_FIELDS).unwrap_or_default(),
            url: pick(map, URL_FIELDS).unwrap_or_default(),
            year: pick(map, YEAR_FIELDS).unwrap_or_default(),
            kind: pick(map, KIND_FIELDS).unwrap_or_default(),
            cover: pick(map, COVER_FIELDS),
        },
        other => {
            debug!(entry = %other, "Ignoring playlist entry with unsupported shape");
            Track::default()
        }
    }
}

/// Normalize a whole playlist document, keeping only playable tracks.
///
/// Source order is preserved.
pub fn normalize_entries(entries: &[Value]) -> Vec<Track> {
    let tracks: Vec<Track> = entries
        .iter()
        .map(normalize)
        .filter(Track::is_playable)
        .collect();

    if tracks.len() < entries.len() {
        debug!(
            dropped = entries.len() - tracks.len(),
            kept = tracks.len(),
            "Dropped playlist entries without a stream URL"
        );
    }

    tracks
}

/// First present, non-blank value among `names`, in order.
fn pick(map: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| map.get(*name))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
