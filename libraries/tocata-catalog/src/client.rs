//! Catalog client.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, PlaylistEntry, PlaylistIndex};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Response};
use serde_json::Value;
use tocata_core::{FetchError, PlaylistSource};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Client for a playlist catalog served as static JSON.
///
/// The index is fetched lazily on first use and kept for the lifetime of
/// the client; call [`CatalogClient::refresh_index`] to re-read it.
pub struct CatalogClient {
    http: Client,
    index_url: Url,
    index: RwLock<Option<PlaylistIndex>>,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.index_url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let index_url = Url::parse(config.index_url.trim())
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.index_url, e)))?;

        if index_url.scheme() != "http" && index_url.scheme() != "https" {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(std::time::Duration::from_secs(10)))
            .user_agent(format!("Tocata/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            index_url,
            index: RwLock::new(None),
        })
    }

    /// The configured index URL.
    pub fn index_url(&self) -> &str {
        self.index_url.as_str()
    }

    /// The playlist index, fetching it on first call.
    pub async fn index(&self) -> Result<PlaylistIndex> {
        if let Some(index) = self.index.read().await.as_ref() {
            return Ok(index.clone());
        }
        self.refresh_index().await
    }

    /// Fetch the playlist index again and replace the cached copy.
    pub async fn refresh_index(&self) -> Result<PlaylistIndex> {
        let url = self.index_url.clone();
        let response = self.get(&url).await?;

        let body: Value = response.json().await.map_err(|e| CatalogError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let index = parse_index(&url, body)?;
        info!(url = %url, playlists = index.len(), "Loaded playlist index");

        *self.index.write().await = Some(index.clone());
        Ok(index)
    }

    /// Raw entries of the named playlist.
    ///
    /// A body that is not a JSON array is logged and treated as an empty
    /// playlist.
    pub async fn fetch_playlist(&self, name: &str) -> Result<Vec<Value>> {
        let index = self.index().await?;
        let entry = index
            .get(name)
            .ok_or_else(|| CatalogError::UnknownPlaylist(name.to_string()))?;

        let url = Url::parse(&entry.url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", entry.url, e)))?;
        let response = self.get(&url).await?;

        let text = response.text().await.map_err(|e| CatalogError::Request {
            url: url.to_string(),
            source: e,
        })?;

        let entries = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                warn!(
                    playlist = %name,
                    url = %url,
                    found = json_kind(&other),
                    "Playlist document is not an array, treating as empty"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    playlist = %name,
                    url = %url,
                    error = %e,
                    "Playlist document is not valid JSON, treating as empty"
                );
                Vec::new()
            }
        };

        debug!(playlist = %name, entries = entries.len(), "Fetched playlist");
        Ok(entries)
    }

    /// GET with cache busting; non-success statuses become errors.
    async fn get(&self, url: &Url) -> Result<Response> {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("t", &chrono::Utc::now().timestamp_millis().to_string());

        debug!(url = %url, "Fetching catalog document");

        let response = self
            .http
            .get(url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| CatalogError::Request {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

/// Build the index from an object of `name -> url`, resolving relative URLs.
fn parse_index(url: &Url, body: Value) -> Result<PlaylistIndex> {
    let map = match body {
        Value::Object(map) => map,
        other => {
            return Err(CatalogError::Parse {
                url: url.to_string(),
                reason: format!("expected an object, found {}", json_kind(&other)),
            });
        }
    };

    let mut entries = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Some(location) = value.as_str() else {
            warn!(playlist = %name, "Index entry is not a URL string, skipping");
            continue;
        };

        match url.join(location) {
            Ok(resolved) => entries.push(PlaylistEntry {
                name,
                url: resolved.to_string(),
            }),
            Err(e) => {
                warn!(playlist = %name, location = %location, error = %e, "Invalid playlist URL, skipping");
            }
        }
    }

    Ok(PlaylistIndex::new(entries))
}

#[async_trait]
impl PlaylistSource for CatalogClient {
    async fn playlist_names(&self) -> std::result::Result<Vec<String>, FetchError> {
        Ok(self.index().await?.names())
    }

    async fn fetch_entries(&self, playlist: &str) -> std::result::Result<Vec<Value>, FetchError> {
        Ok(self.fetch_playlist(playlist).await?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
