//! Error types for the catalog client.

use thiserror::Error;
use tocata_core::FetchError;

/// Errors that can occur when fetching catalog documents.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Transport failure (connect, timeout, reset, body read)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server returned a non-success response
    #[error("Server returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid index URL or playlist URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the playlist index
    #[error("Failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// Playlist name not present in the index
    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Client(source) => FetchError::Unreachable {
                url: String::new(),
                reason: source.to_string(),
            },
            CatalogError::Request { url, source } => FetchError::Unreachable {
                url,
                reason: source.to_string(),
            },
            CatalogError::Status { url, status } => FetchError::Status { url, status },
            CatalogError::InvalidUrl(url) => FetchError::Malformed {
                url,
                reason: "invalid URL".into(),
            },
            CatalogError::Parse { url, reason } => FetchError::Malformed { url, reason },
            CatalogError::UnknownPlaylist(name) => FetchError::UnknownPlaylist(name),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_fetch_status() {
        let err: FetchError = CatalogError::Status {
            url: "https://x/rock.json".into(),
            status: 503,
        }
        .into();

        assert_eq!(
            err,
            FetchError::Status {
                url: "https://x/rock.json".into(),
                status: 503
            }
        );
    }

    #[test]
    fn unknown_playlist_is_preserved() {
        let err: FetchError = CatalogError::UnknownPlaylist("jazz".into()).into();
        assert_eq!(err, FetchError::UnknownPlaylist("jazz".into()));
    }

    #[test]
    fn parse_maps_to_malformed() {
        let err: FetchError = CatalogError::Parse {
            url: "https://x/index.json".into(),
            reason: "expected an object".into(),
        }
        .into();

        assert!(matches!(err, FetchError::Malformed { .. }));
    }
}
