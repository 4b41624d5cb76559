//! Core traits for platform abstraction

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Where playlists come from.
///
/// The HTTP catalog implements this against a playlist index document;
/// tests implement it in memory.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Playlist names, in index document order.
    async fn playlist_names(&self) -> Result<Vec<String>, FetchError>;

    /// Raw entries of one playlist, in document order.
    ///
    /// A document that is not a list of entries yields an empty list rather
    /// than an error. Only transport and status failures (and unknown names)
    /// are reported.
    async fn fetch_entries(&self, playlist: &str) -> Result<Vec<Value>, FetchError>;
}
