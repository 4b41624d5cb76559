//! Cover search backends

use crate::error::{ArtworkError, Result};
use crate::types::{SearchCandidate, SearchQuery};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public iTunes Search API host
pub const ITUNES_BASE_URL: &str = "https://itunes.apple.com";

/// A catalog that can be searched for cover candidates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoverSearch: Send + Sync {
    /// Run one search attempt.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchCandidate>>;
}

/// [`CoverSearch`] backed by the iTunes Search API.
pub struct ItunesSearch {
    http: Client,
    search_url: Url,
}

impl ItunesSearch {
    /// Search the public iTunes host.
    pub fn new() -> Result<Self> {
        Self::with_base_url(ITUNES_BASE_URL)
    }

    /// Search a compatible host, e.g. a mirror or a test server.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| ArtworkError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let search_url = base
            .join("search")
            .map_err(|e| ArtworkError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tocata/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, search_url })
    }
}

#[async_trait]
impl CoverSearch for ItunesSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchCandidate>> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("term", &query.term)
            .append_pair("limit", &query.limit.to_string())
            .append_pair("entity", query.kind.entity());

        debug!(term = %query.term, entity = %query.kind, "Searching for cover");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Status(status.as_u16()));
        }

        let body: ItunesResponse = response
            .json()
            .await
            .map_err(|e| ArtworkError::Parse(format!("Failed to parse search results: {}", e)))?;

        Ok(body.results.into_iter().map(SearchCandidate::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ItunesResponse {
    #[serde(default)]
    results: Vec<ItunesResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItunesResult {
    track_name: Option<String>,
    collection_name: Option<String>,
    artist_name: Option<String>,
    collection_artist_name: Option<String>,
    release_date: Option<String>,
    #[serde(rename = "artworkUrl100")]
    artwork_url_100: Option<String>,
    #[serde(rename = "artworkUrl60")]
    artwork_url_60: Option<String>,
}

impl From<ItunesResult> for SearchCandidate {
    fn from(r: ItunesResult) -> Self {
        Self {
            title: first_non_empty(r.track_name, r.collection_name),
            artist: first_non_empty(r.artist_name, r.collection_artist_name),
            release_year: r.release_date.as_deref().and_then(release_year),
            artwork_url: r
                .artwork_url_100
                .filter(|u| !u.is_empty())
                .or(r.artwork_url_60.filter(|u| !u.is_empty())),
        }
    }
}

fn first_non_empty(a: Option<String>, b: Option<String>) -> String {
    a.filter(|s| !s.is_empty())
        .or(b.filter(|s| !s.is_empty()))
        .unwrap_or_default()
}

/// Year of an RFC 3339 timestamp, or the leading digits of a bare date.
fn release_year(date: &str) -> Option<String> {
    use chrono::Datelike;

    if let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(date) {
        return Some(parsed.year().to_string());
    }

    let year: String = date.chars().take_while(|c| c.is_ascii_digit()).collect();
    (year.len() == 4).then_some(year)
}
