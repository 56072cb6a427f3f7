use tempfile::TempDir;

use crate::dict::Weight;
use crate::settings::EngineConfig;

use super::{EngineError, PredictionEngine, SuggestionStatus};

fn make_engine(
    entries: &[(Weight, &str)],
    tweak: impl FnOnce(&mut EngineConfig),
) -> (TempDir, PredictionEngine) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.tsv");
    let lines: String = entries
        .iter()
        .map(|(w, word)| format!("{w}\t{word}\n"))
        .collect();
    std::fs::write(&path, lines).unwrap();

    let mut config = EngineConfig {
        dictionary_path: path,
        ..EngineConfig::default()
    };
    tweak(&mut config);
    let engine = PredictionEngine::new(&config).unwrap();
    (dir, engine)
}

const NO_SHIFT: &[bool] = &[false; 8];

#[test]
fn ranked_by_weight_at_shared_prefix() {
    let (_dir, mut engine) = make_engine(&[(5, "apple"), (3, "apply")], |_| {});
    // a-p-p-l = 2-7-7-5; both words sit one level below.
    let suggestions = engine.query(&[2, 7, 7, 5], NO_SHIFT);
    assert_eq!(suggestions, vec!["apple", "apply"]);
    assert_eq!(engine.status(), SuggestionStatus::Exists);
}

#[test]
fn no_match_goes_to_none_and_short_circuits() {
    let (_dir, mut engine) = make_engine(&[(5, "apple")], |_| {});
    assert!(engine.query(&[9, 9], NO_SHIFT).is_empty());
    assert_eq!(engine.status(), SuggestionStatus::None);

    // Further keystrokes return empty without touching the tries.
    assert!(engine.query(&[2, 7, 7, 5], NO_SHIFT).is_empty());
    assert_eq!(engine.status(), SuggestionStatus::None);
}

#[test]
fn retract_recovers_from_none() {
    let (_dir, mut engine) = make_engine(&[(5, "apple")], |_| {});
    assert!(engine.query(&[2, 7, 9, 9], NO_SHIFT).is_empty());
    assert_eq!(engine.status(), SuggestionStatus::None);

    // Backspace re-queries instead of trusting the prior status.
    let suggestions = engine.retract(&[2, 7, 7], NO_SHIFT);
    assert_eq!(suggestions, vec!["apple"]);
    assert_eq!(engine.status(), SuggestionStatus::Exists);
}

#[test]
fn quota_backfill_from_sparse_cache() {
    // 15 trie words and 3 cached words under prefix 2, quotas 10/10:
    // the trie covers the cache shortfall up to its own availability,
    // so the merge yields 15 + 3 = 18 suggestions.
    let trie_words: [&str; 15] = [
        "at", "an", "am", "as", "ad", "ag", "aj", "ap", "aw", "ace", "act",
        "ask", "art", "arm", "ant",
    ];
    let entries: Vec<(Weight, &str)> =
        trie_words.iter().map(|&w| (2, w)).collect();
    let (_dir, mut engine) = make_engine(&entries, |_| {});
    // All three share the 2-2-2 node, so their relative order is fixed.
    for word in ["cab", "bac", "abc"] {
        engine.cache.commit(word);
    }

    let suggestions = engine.query(&[2], NO_SHIFT);
    assert_eq!(suggestions.len(), 18);
    // Trie results first, then the cache's.
    assert!(suggestions[..15].iter().all(|w| trie_words.contains(&w.as_str())));
    assert_eq!(&suggestions[15..], &["cab", "bac", "abc"]);
}

#[test]
fn both_quotas_met_truncates_each_source() {
    let trie_words: [&str; 15] = [
        "at", "an", "am", "as", "ad", "ag", "aj", "ap", "aw", "ace", "act",
        "ask", "art", "arm", "ant",
    ];
    let entries: Vec<(Weight, &str)> =
        trie_words.iter().map(|&w| (2, w)).collect();
    let (_dir, mut engine) = make_engine(&entries, |c| {
        c.num_results = 8;
        c.num_cache_results = 2;
    });
    for word in ["cab", "bac", "abc"] {
        engine.cache.commit(word);
    }

    let suggestions = engine.query(&[2], NO_SHIFT);
    assert_eq!(suggestions.len(), 8);
    assert_eq!(&suggestions[6..], &["cab", "bac"]);
}

#[test]
fn duplicates_keep_first_seen_position() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |_| {});
    engine.cache.commit("cat");
    engine.cache.commit("cab");

    let suggestions = engine.query(&[2], NO_SHIFT);
    assert_eq!(suggestions, vec!["cat", "cab"]);
}

#[test]
fn shift_overlay_capitalizes_positions() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |_| {});
    assert_eq!(
        engine.query(&[2, 2, 8], &[true, false, false]),
        vec!["Cat"]
    );
    // Longer shift sequence truncates at the word.
    assert_eq!(
        engine.query(&[2, 2, 8], &[true, true, true, true]),
        vec!["CAT"]
    );
    // Shorter one leaves the tail as stored.
    assert_eq!(engine.query(&[2, 2, 8], &[true]), vec!["Cat"]);
    // No shift anywhere skips the overlay.
    assert_eq!(engine.query(&[2, 2, 8], &[false, false]), vec!["cat"]);
}

#[test]
fn remember_rejects_invalid_words() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |_| {});
    let before = engine.trie.entries();

    assert!(!engine.remember_choice(""));
    assert!(!engine.remember_choice("a1b"));
    assert!(!engine.remember_choice("so-so"));

    assert_eq!(engine.trie.entries(), before);
    assert!(engine.cache.is_empty());
}

#[test]
fn remember_in_none_state_rearms_without_mutation() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |_| {});
    engine.query(&[9, 9], NO_SHIFT);
    assert_eq!(engine.status(), SuggestionStatus::None);

    let before = engine.trie.entries();
    assert!(!engine.remember_choice("cat"));
    assert_eq!(engine.status(), SuggestionStatus::Pending);
    assert_eq!(engine.trie.entries(), before);
    assert!(engine.cache.is_empty());
}

#[test]
fn remember_updates_trie_and_cache_lowercased() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |_| {});
    engine.query(&[2, 2, 8], NO_SHIFT);

    assert!(engine.remember_choice("Cat"));
    assert!(engine.trie.entries().contains(&(6, "cat".to_string())));
    assert_eq!(engine.cache.words().collect::<Vec<_>>(), vec!["cat"]);

    // A brand-new word enters the dictionary at the default weight.
    assert!(engine.remember_choice("dog"));
    assert!(engine.trie.entries().contains(&(1, "dog".to_string())));
    assert_eq!(engine.cache.words().next(), Some("dog"));
}

#[test]
fn empty_key_sequence_returns_root_suggestions() {
    // Root-level deeper suggestions reach short words; not an error.
    let (_dir, mut engine) = make_engine(&[(5, "at")], |_| {});
    assert_eq!(engine.query(&[], NO_SHIFT), vec!["at"]);
}

#[test]
fn cache_quota_of_zero_skips_cache() {
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |c| {
        c.num_results = 5;
        c.num_cache_results = 0;
    });
    engine.cache.commit("cab");
    assert_eq!(engine.query(&[2], NO_SHIFT), vec!["cat"]);
}

#[test]
fn cache_depth_clamps_with_the_trie() {
    // An out-of-range depth must clamp for both sources: a 12-letter
    // cached word sits 11 levels below [2] and may not surface there.
    let (_dir, mut engine) = make_engine(&[(5, "cat")], |c| {
        c.suggestion_depth = 99;
    });
    engine.cache.commit("aaaaaaaaaaaa");

    assert_eq!(engine.query(&[2], NO_SHIFT), vec!["cat"]);
}

#[test]
fn construction_rejects_bad_quota() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.tsv");
    std::fs::write(&path, "1\tcat\n").unwrap();
    let config = EngineConfig {
        dictionary_path: path,
        num_results: 10,
        num_cache_results: 10,
        ..EngineConfig::default()
    };
    assert!(matches!(
        PredictionEngine::new(&config).unwrap_err(),
        EngineError::Config(_)
    ));
}

#[test]
fn construction_fails_without_dictionary() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig {
        dictionary_path: dir.path().join("absent.tsv"),
        ..EngineConfig::default()
    };
    assert!(matches!(
        PredictionEngine::new(&config).unwrap_err(),
        EngineError::Dict(_)
    ));
}
