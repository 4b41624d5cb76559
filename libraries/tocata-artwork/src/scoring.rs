//! Candidate scoring
//!
//! Search results are fuzzy. Each candidate gets points for how well its
//! title, artist and release year agree with the track, after both sides
//! are folded by [`normalize_text`].

use crate::types::SearchCandidate;
use tocata_core::Track;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const TITLE_CONTAINED: i32 = 5;
const ARTIST_CONTAINED: i32 = 3;
const YEAR_MATCH: i32 = 2;
const TITLE_EXACT: i32 = 4;
const ARTIST_EXACT: i32 = 2;

/// Fold text for comparison.
///
/// Lowercases, strips diacritics, drops punctuation and collapses runs of
/// whitespace. `"Águas de Março!"` becomes `"aguas de marco"`.
pub fn normalize_text(s: &str) -> String {
    let folded: String = s
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The track side of a comparison, folded once per resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTarget {
    title: String,
    artist: String,
    year: String,
}

impl ScoreTarget {
    pub fn new(title: &str, artist: &str, year: &str) -> Self {
        Self {
            title: normalize_text(title),
            artist: normalize_text(artist),
            year: year.trim().to_string(),
        }
    }

    pub fn from_track(track: &Track) -> Self {
        Self::new(&track.title, &track.artist, &track.year)
    }

    /// Points for one candidate.
    pub fn score(&self, candidate: &SearchCandidate) -> i32 {
        let title = normalize_text(&candidate.title);
        let artist = normalize_text(&candidate.artist);
        let mut score = 0;

        if !self.title.is_empty() && title.contains(&self.title) {
            score += TITLE_CONTAINED;
        } else {
            let hits = self
                .title
                .split(' ')
                .filter(|token| !token.is_empty() && title.contains(token))
                .count();
            score += hits as i32;
        }

        if !self.artist.is_empty() && artist.contains(&self.artist) {
            score += ARTIST_CONTAINED;
        }

        if !self.year.is_empty() && candidate.release_year.as_deref() == Some(self.year.as_str()) {
            score += YEAR_MATCH;
        }

        if !self.title.is_empty() && title == self.title {
            score += TITLE_EXACT;
        }

        if !self.artist.is_empty() && artist == self.artist {
            score += ARTIST_EXACT;
        }

        score
    }

    /// Highest scoring candidate, the earliest one on ties.
    pub fn best<'a>(&self, candidates: &'a [SearchCandidate]) -> Option<(&'a SearchCandidate, i32)> {
        let mut best: Option<(&SearchCandidate, i32)> = None;
        for candidate in candidates {
            let score = self.score(candidate);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best
    }
}
