//! Property tests for sequencing

use proptest::prelude::*;
use std::collections::HashSet;
use tocata_core::Track;
use tocata_playback::{Pool, RngSource, Sequencer, SessionConfig};

fn create_pool(len: usize) -> Pool {
    let tracks = (0..len)
        .map(|i| {
            Track::new(
                format!("Song {}", i),
                "Artist",
                format!("https://cdn.example.com/{}.mp3", i),
            )
        })
        .collect();
    Pool::new("Props", tracks)
}

fn sequencer(shuffle: bool) -> Sequencer {
    Sequencer::new(&SessionConfig {
        shuffle,
        ..SessionConfig::default()
    })
}

proptest! {
    #[test]
    fn shuffled_cycle_never_repeats(len in 2usize..24, seed in any::<u64>()) {
        let mut rng = RngSource::seeded(seed);
        let mut pool = create_pool(len);
        pool.shuffle(&mut rng);
        let mut seq = sequencer(true);

        let mut seen = HashSet::new();
        seq.record_start(&pool);
        seen.insert(pool.key_at(seq.index()).unwrap());

        for _ in 1..len {
            seq.next(&pool, &mut rng).unwrap();
            let key = pool.key_at(seq.index()).unwrap();
            prop_assert!(seen.insert(key), "track repeated before the cycle completed");
            seq.record_start(&pool);
        }

        // Every track played once; the cycle starts over
        prop_assert!(seq.cycle().is_empty());
    }

    #[test]
    fn shuffled_next_leaves_current(len in 2usize..24, steps in 1usize..60, seed in any::<u64>()) {
        let mut rng = RngSource::seeded(seed);
        let pool = create_pool(len);
        let mut seq = sequencer(true);

        for step in 0..steps {
            let before = seq.index();
            let after = seq.next(&pool, &mut rng).unwrap();
            prop_assert!(after < len);
            prop_assert_ne!(before, after);
            if step % 2 == 0 {
                seq.record_start(&pool);
            }
        }
    }

    #[test]
    fn linear_walk_wraps(len in 1usize..30, start in 0usize..30) {
        let mut rng = RngSource::seeded(0);
        let pool = create_pool(len);
        let mut seq = sequencer(false);
        seq.set_index(start % len);

        for _ in 0..len {
            seq.next(&pool, &mut rng).unwrap();
        }
        prop_assert_eq!(seq.index(), start % len);

        for _ in 0..len {
            seq.prev(&pool, &mut rng).unwrap();
        }
        prop_assert_eq!(seq.index(), start % len);
    }

    #[test]
    fn toggle_keeps_current_track(len in 1usize..24, steps in 0usize..40, seed in any::<u64>()) {
        let mut rng = RngSource::seeded(seed);
        let mut pool = create_pool(len);
        let mut seq = sequencer(false);

        for _ in 0..steps {
            seq.next(&pool, &mut rng);
        }
        let current = pool.key_at(seq.index()).unwrap();

        prop_assert!(seq.toggle_shuffle(&mut pool, &mut rng));
        prop_assert_eq!(pool.key_at(seq.index()).unwrap(), current.clone());

        seq.next(&pool, &mut rng);
        let shuffled_current = pool.key_at(seq.index()).unwrap();

        prop_assert!(!seq.toggle_shuffle(&mut pool, &mut rng));
        prop_assert_eq!(pool.key_at(seq.index()).unwrap(), shuffled_current);
    }

    #[test]
    fn shuffled_prev_stays_in_bounds(len in 1usize..24, seed in any::<u64>()) {
        let mut rng = RngSource::seeded(seed);
        let pool = create_pool(len);
        let mut seq = sequencer(true);

        for _ in 0..20 {
            prop_assert!(seq.prev(&pool, &mut rng).unwrap() < len);
        }
    }
}
