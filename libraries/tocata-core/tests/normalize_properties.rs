//! Property-based tests for entry normalization and track identity
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use tocata_core::{normalize, normalize_entries, Track};

// ===== Helpers =====

fn arbitrary_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9:/.]{0,20}".prop_map(Value::String),
        (
            proptest::option::of("[A-Za-z ]{0,20}"),
            proptest::option::of("[A-Za-z ]{0,20}"),
            proptest::option::of("[a-z0-9:/.]{0,20}"),
        )
            .prop_map(|(title, artist, url)| {
                let mut obj = serde_json::Map::new();
                if let Some(title) = title {
                    obj.insert("title".into(), json!(title));
                }
                if let Some(artist) = artist {
                    obj.insert("artist".into(), json!(artist));
                }
                if let Some(url) = url {
                    obj.insert("url".into(), json!(url));
                }
                Value::Object(obj)
            }),
        any::<i64>().prop_map(|n| json!(n)),
        Just(Value::Null),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: every kept track has a stream URL and order is preserved
    #[test]
    fn normalized_pool_only_holds_playable_tracks(
        entries in prop::collection::vec(arbitrary_entry(), 0..40)
    ) {
        let tracks = normalize_entries(&entries);

        prop_assert!(tracks.iter().all(|t| !t.url.is_empty()));

        let expected: Vec<Track> = entries
            .iter()
            .map(normalize)
            .filter(|t| !t.url.is_empty())
            .collect();
        prop_assert_eq!(tracks, expected);
    }

    /// Property: the key ignores case and surrounding whitespace of artist and title
    #[test]
    fn key_is_case_and_padding_insensitive(
        title in "[A-Za-z][A-Za-z ]{0,15}",
        artist in "[A-Za-z][A-Za-z ]{0,15}",
        url_a in "[a-z]{1,10}",
        url_b in "[a-z]{1,10}",
    ) {
        let a = Track::new(title.clone(), artist.clone(), url_a);
        let b = Track::new(
            format!("  {}  ", title.to_uppercase()),
            format!("\t{}", artist.to_lowercase()),
            url_b,
        );
        prop_assert_eq!(a.key(), b.key());
    }

    /// Property: normalization never panics and is deterministic
    #[test]
    fn normalize_is_deterministic(entry in arbitrary_entry()) {
        prop_assert_eq!(normalize(&entry), normalize(&entry));
    }
}
