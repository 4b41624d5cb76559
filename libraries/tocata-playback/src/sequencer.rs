//! Sequencer: which track plays next
//!
//! Linear mode walks the play order and wraps. Shuffled mode picks at random
//! among tracks not yet started in the current cycle, so no key repeats until
//! every other track has had a turn. "Previous" under shuffle is a fresh
//! random pick, not a history step.

use crate::pool::Pool;
use crate::random::RandomSource;
use crate::types::SessionConfig;
use serde::Serialize;
use std::collections::HashSet;
use tocata_core::TrackKey;

/// Keys started in the current shuffle cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleState {
    played: HashSet<TrackKey>,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &TrackKey) -> bool {
        self.played.contains(key)
    }

    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }

    pub fn clear(&mut self) {
        self.played.clear();
    }

    /// Record a started key; a full set starts a new cycle.
    pub fn record(&mut self, key: TrackKey, pool_len: usize) {
        self.played.insert(key);
        if self.played.len() >= pool_len {
            self.played.clear();
        }
    }
}

/// Rolling counter of recently started keys
///
/// Repeated starts of the same key count once. After `reset_after` counted
/// starts the counter empties itself. Nothing reads it besides the session
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentPlays {
    keys: HashSet<TrackKey>,
    since_reset: usize,
    last_counted: Option<TrackKey>,
    reset_after: usize,
}

impl RecentPlays {
    pub fn new(reset_after: usize) -> Self {
        Self {
            keys: HashSet::new(),
            since_reset: 0,
            last_counted: None,
            reset_after,
        }
    }

    pub fn record(&mut self, key: &TrackKey) {
        if self.last_counted.as_ref() == Some(key) {
            return;
        }

        self.keys.insert(key.clone());
        self.since_reset += 1;
        self.last_counted = Some(key.clone());

        if self.since_reset >= self.reset_after {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.since_reset = 0;
        self.last_counted = None;
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn since_reset(&self) -> usize {
        self.since_reset
    }
}

/// Position, ordering mode and cycle bookkeeping
#[derive(Debug, Clone)]
pub struct Sequencer {
    index: usize,
    shuffled: bool,
    cycle: CycleState,
    recent: RecentPlays,
    previous_retry_limit: usize,
    prefetch_attempts: usize,
}

/// Sequencer state for debugging views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequencerSnapshot {
    pub index: usize,
    pub shuffled: bool,
    pub cycle_len: usize,
    pub recent_len: usize,
    pub plays_since_reset: usize,
}

impl Sequencer {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            index: 0,
            shuffled: config.shuffle,
            cycle: CycleState::new(),
            recent: RecentPlays::new(config.recent_reset_after),
            previous_retry_limit: config.previous_retry_limit,
            prefetch_attempts: config.prefetch_attempts,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn cycle(&self) -> &CycleState {
        &self.cycle
    }

    pub fn recent(&self) -> &RecentPlays {
        &self.recent
    }

    /// Forget position and history; the pool is about to change.
    pub fn reset(&mut self) {
        self.index = 0;
        self.cycle.clear();
        self.recent.clear();
    }

    /// Advance. Returns the new index, or `None` for an empty pool.
    pub fn next(&mut self, pool: &Pool, rng: &mut dyn RandomSource) -> Option<usize> {
        let len = pool.len();
        if len == 0 {
            return None;
        }

        self.index = if self.shuffled {
            self.next_shuffled(pool, rng)
        } else {
            (self.index + 1) % len
        };
        Some(self.index)
    }

    fn next_shuffled(&mut self, pool: &Pool, rng: &mut dyn RandomSource) -> usize {
        let len = pool.len();
        let current = self.index;

        let mut candidates: Vec<usize> = (0..len)
            .filter(|&i| i != current)
            .filter(|&i| pool.key_at(i).map_or(true, |key| !self.cycle.contains(&key)))
            .collect();

        if candidates.is_empty() {
            self.cycle.clear();
            candidates = (0..len).filter(|&i| i != current).collect();
        }

        if candidates.is_empty() {
            (current + 1) % len
        } else {
            candidates[rng.index(candidates.len())]
        }
    }

    /// Step back. Under shuffle this is a random pick that tries to avoid
    /// the current index, giving up after the retry limit.
    pub fn prev(&mut self, pool: &Pool, rng: &mut dyn RandomSource) -> Option<usize> {
        let len = pool.len();
        if len == 0 {
            return None;
        }

        self.index = if self.shuffled {
            let current = self.index;
            let mut candidate = current;
            for _ in 0..self.previous_retry_limit {
                candidate = rng.index(len);
                if candidate != current {
                    break;
                }
            }
            candidate
        } else {
            (self.index + len - 1) % len
        };
        Some(self.index)
    }

    /// Flip ordering mode, keeping the current track current.
    ///
    /// Returns whether shuffle is now on. Starts a new cycle.
    pub fn toggle_shuffle(&mut self, pool: &mut Pool, rng: &mut dyn RandomSource) -> bool {
        let current_key = pool.key_at(self.index);

        self.shuffled = !self.shuffled;
        if self.shuffled {
            pool.shuffle(rng);
        } else {
            pool.restore_source_order();
        }

        self.index = current_key
            .and_then(|key| pool.position_of(&key))
            .unwrap_or(0);
        self.cycle.clear();
        self.shuffled
    }

    /// Playback of the current track genuinely started.
    pub fn record_start(&mut self, pool: &Pool) -> Option<TrackKey> {
        let key = pool.key_at(self.index)?;
        self.recent.record(&key);
        self.cycle.record(key.clone(), pool.len());
        Some(key)
    }

    /// Best guess at the next index, for prefetching. Does not move.
    pub fn predict_next(&self, pool: &Pool, rng: &mut dyn RandomSource) -> Option<usize> {
        let len = pool.len();
        if len == 0 {
            return None;
        }

        let linear = (self.index + 1) % len;
        if !self.shuffled {
            return Some(linear);
        }

        for _ in 0..self.prefetch_attempts {
            let candidate = rng.index(len);
            let unplayed = pool
                .key_at(candidate)
                .is_some_and(|key| !self.cycle.contains(&key));
            if candidate != self.index && unplayed {
                return Some(candidate);
            }
        }
        Some(linear)
    }

    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            index: self.index,
            shuffled: self.shuffled,
            cycle_len: self.cycle.len(),
            recent_len: self.recent.len(),
            plays_since_reset: self.recent.since_reset(),
        }
    }
}
