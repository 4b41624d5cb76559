use thiserror::Error;

/// Errors from a single cover search attempt
///
/// None of these leave the resolver; each one just moves resolution on to
/// the next attempt.
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// HTTP request failed
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Search service answered with a non-success status
    #[error("Search service returned status {0}")]
    Status(u16),

    /// Response body was not a search result document
    #[error("Failed to parse search response: {0}")]
    Parse(String),

    /// Search base URL is unusable
    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),

    /// Attempt exceeded the search timeout
    #[error("Search timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
