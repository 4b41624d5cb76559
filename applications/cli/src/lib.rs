//! Tocata command line driver

pub mod config;
pub mod driver;
pub mod error;
pub mod probe;

pub use config::AppConfig;
pub use driver::{HeadlessDriver, PlayReport, PlayedTrack, SkippedTrack};
pub use error::{CliError, Result};
pub use probe::{HttpProbe, TrackProbe};
