//! CLI error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] tocata_catalog::CatalogError),

    #[error("Artwork error: {0}")]
    Artwork(#[from] tocata_artwork::ArtworkError),

    #[error("Playback error: {0}")]
    Playback(#[from] tocata_playback::PlaybackError),

    #[error("Favorites error: {0}")]
    Favorites(#[from] tocata_core::CoreError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No track at position {index} in {playlist}")]
    NoSuchTrack { playlist: String, index: usize },
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
