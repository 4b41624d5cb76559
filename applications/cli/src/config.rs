//! Application configuration

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tocata_artwork::{ArtworkConfig, ITUNES_BASE_URL, DEFAULT_FALLBACK_URL};
use tocata_catalog::CatalogConfig;
use tocata_playback::SessionConfig;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tocata.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_favorites_path")]
    pub favorites_path: PathBuf,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub artwork: ArtworkSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_index_url")]
    pub index_url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtworkSettings {
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    #[serde(default = "default_search_timeout_ms")]
    pub search_timeout_ms: u64,

    #[serde(default = "default_result_limit")]
    pub result_limit: u32,

    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: i32,

    #[serde(default = "default_artwork_size")]
    pub artwork_size: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_stall_timeout_ms")]
    pub stall_timeout_ms: u64,

    #[serde(default = "default_previous_retry_limit")]
    pub previous_retry_limit: usize,

    #[serde(default = "default_recent_reset_after")]
    pub recent_reset_after: usize,

    #[serde(default = "default_prefetch_attempts")]
    pub prefetch_attempts: usize,

    #[serde(default)]
    pub shuffle: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `tocata.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. TOCATA_CATALOG__INDEX_URL
        settings = settings.add_source(
            config::Environment::with_prefix("TOCATA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.index_url.trim().is_empty() {
            return Err(CliError::Config(
                "Playlist index URL is required (set TOCATA_CATALOG__INDEX_URL)".to_string(),
            ));
        }

        let timeouts = [
            ("catalog.request_timeout_ms", self.catalog.request_timeout_ms),
            ("artwork.search_timeout_ms", self.artwork.search_timeout_ms),
            ("session.stall_timeout_ms", self.session.stall_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(CliError::Config(format!("{} must be greater than zero", name)));
            }
        }

        if self.artwork.result_limit == 0 {
            return Err(CliError::Config(
                "artwork.result_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.catalog.index_url.clone())
            .with_timeout(Duration::from_millis(self.catalog.request_timeout_ms))
    }

    pub fn artwork_config(&self) -> ArtworkConfig {
        ArtworkConfig {
            fallback_url: self.artwork.fallback_url.clone(),
            search_timeout: Duration::from_millis(self.artwork.search_timeout_ms),
            result_limit: self.artwork.result_limit,
            acceptance_threshold: self.artwork.acceptance_threshold,
            artwork_size: self.artwork.artwork_size,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            stall_timeout: Duration::from_millis(self.session.stall_timeout_ms),
            previous_retry_limit: self.session.previous_retry_limit,
            recent_reset_after: self.session.recent_reset_after,
            prefetch_attempts: self.session.prefetch_attempts,
            shuffle: self.session.shuffle,
        }
    }

    /// Render as TOML, the format of the config file
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            favorites_path: default_favorites_path(),
            catalog: CatalogSettings::default(),
            artwork: ArtworkSettings::default(),
            session: SessionSettings::default(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            search_base_url: default_search_base_url(),
            fallback_url: default_fallback_url(),
            search_timeout_ms: default_search_timeout_ms(),
            result_limit: default_result_limit(),
            acceptance_threshold: default_acceptance_threshold(),
            artwork_size: default_artwork_size(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            stall_timeout_ms: default_stall_timeout_ms(),
            previous_retry_limit: default_previous_retry_limit(),
            recent_reset_after: default_recent_reset_after(),
            prefetch_attempts: default_prefetch_attempts(),
            shuffle: false,
        }
    }
}

// Default values
fn default_favorites_path() -> PathBuf {
    PathBuf::from("./data/favorites.json")
}

fn default_index_url() -> String {
    "http://localhost:8000/json/playlists.json".to_string()
}

fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_search_base_url() -> String {
    ITUNES_BASE_URL.to_string()
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_URL.to_string()
}

fn default_search_timeout_ms() -> u64 {
    4_000
}

fn default_result_limit() -> u32 {
    3
}

fn default_acceptance_threshold() -> i32 {
    4
}

fn default_artwork_size() -> u32 {
    300
}

fn default_stall_timeout_ms() -> u64 {
    4_000
}

fn default_previous_retry_limit() -> usize {
    40
}

fn default_recent_reset_after() -> usize {
    5
}

fn default_prefetch_attempts() -> usize {
    10
}
