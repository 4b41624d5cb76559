//! Tocata Core
//!
//! Platform-agnostic track types, entry normalization, and source traits
//! shared by every Tocata crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: [`Track`] and its coarse identity [`TrackKey`]
//! - **Normalization**: [`normalize`] turns loosely shaped playlist entries into tracks
//! - **Favorites**: [`Favorites`], the one list of track keys a host persists
//! - **Core Traits**: [`PlaylistSource`], implemented by the HTTP catalog
//! - **Error Handling**: [`FetchError`] and [`CoreError`]
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tocata_core::{normalize, TrackKey};
//!
//! let track = normalize(&json!({
//!     "name": "Aguas de Marco",
//!     "artista": "Elis Regina",
//!     "src": "https://cdn.example.com/aguas.mp3"
//! }));
//!
//! assert_eq!(track.title, "Aguas de Marco");
//! assert_eq!(track.key(), TrackKey::new("elis regina|aguas de marco"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod favorites;
pub mod normalize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, FetchError, Result};
pub use favorites::Favorites;
pub use normalize::{normalize, normalize_entries};
pub use traits::PlaylistSource;
pub use types::{Track, TrackKey};
