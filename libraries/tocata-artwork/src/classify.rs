//! Movie vs song classification

use crate::types::MediaKind;
use tocata_core::Track;

/// Decide which catalog section to search for a track.
///
/// Movie-like when the track's kind mentions a movie, when the playlist is
/// a movie playlist, or when the title contains the standalone word
/// "filme" or "movie".
pub fn media_kind_for(track: &Track, playlist: &str) -> MediaKind {
    let kind = track.kind.to_lowercase();
    let playlist = playlist.to_lowercase();
    let title = track.title.to_lowercase();

    let movie_kind = kind.contains("movie") || kind.contains("filme");
    let movie_playlist = playlist.contains("filme") || playlist.contains("movie");
    let movie_title = title
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|word| word == "filme" || word == "movie");

    if movie_kind || movie_playlist || movie_title {
        MediaKind::Movie
    } else {
        MediaKind::Song
    }
}
