//! Tocata Playback - sequencing and the player session
//!
//! This crate decides which track plays next and keeps a stalled stream
//! from hanging the player. It has no audio of its own: a playback surface
//! (a browser element, a native decoder, the headless CLI driver) loads the
//! tracks announced through [`PlayerEvent`]s and reports back what happened.
//!
//! # Features
//!
//! - Linear and shuffled ordering with a no-repeat cycle
//! - Shuffle toggling that keeps the current track
//! - Stall watchdog that skips tracks which never start
//! - Detached cover lookups whose stale results are dropped
//! - Injectable randomness through [`RandomSource`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tocata_artwork::{ArtworkConfig, CoverResolver, ItunesSearch};
//! use tocata_core::PlaylistSource;
//! use tocata_playback::{PlayerSession, RngSource, SessionConfig};
//!
//! # async fn demo(source: Arc<dyn PlaylistSource>) -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = CoverResolver::new(Arc::new(ItunesSearch::new()?), ArtworkConfig::default());
//! let (mut session, _alarms) = PlayerSession::new(
//!     SessionConfig::default(),
//!     source,
//!     resolver,
//!     Box::new(RngSource::from_entropy()),
//! );
//!
//! session.start().await?;
//! session.next(true);
//! for event in session.drain_events() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

mod cover;
mod error;
mod events;
mod pool;
mod random;
mod sequencer;
mod session;
mod shuffle;
mod types;
mod watchdog;

pub use cover::{CoverJob, CoverPurpose, ResolvedCover};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use pool::Pool;
pub use random::{RandomSource, RngSource};
pub use sequencer::{CycleState, RecentPlays, Sequencer, SequencerSnapshot};
pub use session::{PlayerSession, SessionSnapshot};
pub use shuffle::shuffle;
pub use types::{PlaybackState, ReadyState, SessionConfig, SurfaceStatus};
pub use watchdog::{StallAlarm, StallAlarms, StallWatchdog};
