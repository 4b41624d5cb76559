//! Error types for Tocata core

use thiserror::Error;

/// Failure to obtain the playlist index or a playlist document.
///
/// Raised by [`PlaylistSource`](crate::PlaylistSource) implementations and
/// surfaced unchanged to whoever asked for a pool load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, timeout, reset
    #[error("{url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },

    /// Server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The playlist index could not be understood
    #[error("{url} returned a malformed document: {reason}")]
    Malformed { url: String, reason: String },

    /// Playlist name is not present in the index
    #[error("Unknown playlist: {0}")]
    UnknownPlaylist(String),
}

/// Errors from core storage operations (favorites persistence).
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages_name_the_url() {
        let err = FetchError::Status {
            url: "https://example.com/rock.json".into(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/rock.json returned status 404"
        );

        let err = FetchError::UnknownPlaylist("jazz".into());
        assert_eq!(err.to_string(), "Unknown playlist: jazz");
    }
}
