//! HTTP client for Tocata playlist catalogs.
//!
//! A catalog is two kinds of static JSON document:
//!
//! - a playlist **index**: an object mapping playlist names to playlist URLs,
//!   kept in document order (relative URLs resolve against the index URL)
//! - one **playlist** document per name: an array of loosely shaped entries
//!   that [`tocata_core::normalize`] understands
//!
//! Every request carries a `t=<unix millis>` query parameter and
//! `Cache-Control: no-store` so edited playlists show up without waiting on
//! intermediate caches.
//!
//! # Example
//!
//! ```ignore
//! use tocata_catalog::{CatalogClient, CatalogConfig};
//!
//! let client = CatalogClient::new(CatalogConfig::new("https://music.example.com/playlists.json"))?;
//!
//! let index = client.index().await?;
//! for entry in index.iter() {
//!     println!("{} -> {}", entry.name, entry.url);
//! }
//!
//! let entries = client.fetch_playlist("Bossa Nova").await?;
//! println!("{} raw entries", entries.len());
//! ```

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use types::{CatalogConfig, PlaylistEntry, PlaylistIndex};
