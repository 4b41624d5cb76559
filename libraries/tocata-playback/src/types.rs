//! Core types for playback sequencing

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Player session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long an autoplayed track may take to start before it is skipped
    pub stall_timeout: Duration,

    /// Random draws "previous" makes under shuffle to avoid the current track
    pub previous_retry_limit: usize,

    /// Counted starts after which the recent-plays counter resets
    pub recent_reset_after: usize,

    /// Random draws used to guess the next shuffled track for cover prefetch
    pub prefetch_attempts: usize,

    /// Start in shuffled mode
    pub shuffle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stall_timeout: Duration::from_millis(4000),
            previous_retry_limit: 40,
            recent_reset_after: 5,
            prefetch_attempts: 10,
            shuffle: false,
        }
    }
}

/// What the player is doing, as far as the core knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded, or a track loaded without autoplay
    Stopped,
    /// Track handed to the surface with autoplay; waiting for it to start
    Loading,
    /// Surface reported that playback genuinely started
    Playing,
    /// Surface reported a pause
    Paused,
}

/// Buffered readiness reported by the playback surface, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadyState {
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    /// Enough data to start and keep playing for a while
    HaveFutureData,
    HaveEnoughData,
}

/// Surface status sampled when a stall alarm fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceStatus {
    pub paused: bool,
    pub ready_state: ReadyState,
    pub position: Duration,
}

impl SurfaceStatus {
    /// Status of a surface that never got going
    pub fn idle() -> Self {
        Self {
            paused: true,
            ready_state: ReadyState::HaveNothing,
            position: Duration::ZERO,
        }
    }

    /// Status of a surface that is playing normally
    pub fn playing(position: Duration) -> Self {
        Self {
            paused: false,
            ready_state: ReadyState::HaveEnoughData,
            position,
        }
    }

    /// Any one of: paused, under-buffered, or position still at zero.
    pub fn is_stalled(&self) -> bool {
        self.paused || self.ready_state < ReadyState::HaveFutureData || self.position.is_zero()
    }
}
