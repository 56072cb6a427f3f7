//! Prediction driver: merges weighted-trie and recency-cache suggestions,
//! dedupes, applies the shift overlay, and tracks the per-word suggestion
//! status machine.

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use tracing::{debug, debug_span, warn};

use crate::cache::RecencyCache;
use crate::dict::{DictError, DictStore, WeightedTrie};
use crate::keypad::KeyDigit;
use crate::settings::{ConfigError, EngineConfig};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("dictionary load failed: {0}")]
    Dict(#[from] DictError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Per-word suggestion state.
///
/// Transitions:
/// - `Pending` → `Exists` on a query with results, → `None` on a query
///   with no results.
/// - `Exists` ↔ `None` on subsequent queries (only via `retract` once
///   `None` is reached — plain queries short-circuit in `None`).
/// - any state → `Pending` on `reset` (word committed or cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionStatus {
    /// Waiting for a new word to begin.
    Pending,
    /// The last query produced suggestions.
    Exists,
    /// The last query produced nothing; further keystrokes are pointless
    /// until a backspace or a fresh word.
    None,
}

/// Orchestrates the weighted trie and the recency cache for one UI session.
///
/// Owns both structures exclusively; all operations are synchronous,
/// bounded-depth tree walks on the calling thread.
#[derive(Debug)]
pub struct PredictionEngine {
    trie: WeightedTrie,
    cache: RecencyCache,
    status: SuggestionStatus,
    num_results: usize,
    num_trie_results: usize,
    num_cache_results: usize,
}

impl PredictionEngine {
    /// Build an engine from its configuration. Fails if the configuration
    /// is inconsistent or the dictionary cannot be loaded.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let trie = WeightedTrie::open(
            DictStore::new(&config.dictionary_path),
            config.suggestion_depth,
        )?;
        let cache = RecencyCache::new(config.cache_size, config.suggestion_depth);
        Ok(Self {
            trie,
            cache,
            status: SuggestionStatus::Pending,
            num_results: config.num_results,
            num_trie_results: config.num_results - config.num_cache_results,
            num_cache_results: config.num_cache_results,
        })
    }

    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    pub fn num_results(&self) -> usize {
        self.num_results
    }

    pub fn trie(&self) -> &WeightedTrie {
        &self.trie
    }

    pub fn cache(&self) -> &RecencyCache {
        &self.cache
    }

    /// Ranked suggestions for the in-progress word after a keystroke.
    ///
    /// In the `None` state this returns empty immediately without running
    /// the lookup — the caller decides whether the keystroke still grows
    /// its own buffer. Otherwise the result of the merge drives the next
    /// state: empty → `None`, anything else → `Exists`.
    pub fn query(&mut self, keys: &[KeyDigit], shifts: &[bool]) -> Vec<String> {
        let _span = debug_span!("query", keys_len = keys.len()).entered();
        if self.status == SuggestionStatus::None {
            return Vec::new();
        }

        let merged = self.merge(keys);
        if merged.is_empty() {
            self.status = SuggestionStatus::None;
            return merged;
        }
        self.status = SuggestionStatus::Exists;

        let deduped = dedupe_first_seen(merged);
        debug!(count = deduped.len());
        apply_shift_overlay(deduped, shifts)
    }

    /// Re-query after a backspace. Unlike `query`, this never
    /// short-circuits: shrinking the sequence can recover from `None`.
    pub fn retract(&mut self, keys: &[KeyDigit], shifts: &[bool]) -> Vec<String> {
        if self.status == SuggestionStatus::None {
            self.status = SuggestionStatus::Exists;
        }
        self.query(keys, shifts)
    }

    /// Record the user's chosen word: bump its trie weight (inserting it
    /// if new) and move it to the front of the recency cache.
    ///
    /// Rejects empty or non-letter words without mutating anything. In the
    /// `None` state there was nothing to choose from, so the call only
    /// rearms the status to `Pending` and reports failure.
    pub fn remember_choice(&mut self, word: &str) -> bool {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            debug!(word, "remember rejected: not a letters-only word");
            return false;
        }

        if self.status == SuggestionStatus::None {
            self.status = SuggestionStatus::Pending;
            return false;
        }

        let lower = word.to_ascii_lowercase();
        match self.trie.update_weight(&lower) {
            Ok(weight) => debug!(word = %lower, weight, "choice recorded"),
            Err(e) => {
                // Unreachable after the letters-only check, but never panic
                // on a dictionary path.
                warn!("weight update failed: {e}");
                return false;
            }
        }
        self.cache.commit(&lower);
        true
    }

    /// Rearm for a fresh word (commit, punctuation, or explicit clear).
    pub fn reset(&mut self) {
        self.status = SuggestionStatus::Pending;
    }

    /// Quota-fill merge, trie first then cache.
    ///
    /// Each source gets its configured share; when one falls short the
    /// other may cover the shortfall up to its own availability, so the
    /// total approaches `num_results` whenever either source can supply it.
    fn merge(&self, keys: &[KeyDigit]) -> Vec<String> {
        let trie_s = self.trie.suggestions(keys);
        let cache_s = if self.num_cache_results > 0 {
            self.cache.suggestions(keys)
        } else {
            Vec::new()
        };

        let mut out = Vec::with_capacity(self.num_results);
        if trie_s.len() >= self.num_trie_results && cache_s.len() >= self.num_cache_results {
            out.extend_from_slice(&trie_s[..self.num_trie_results]);
            out.extend_from_slice(&cache_s[..self.num_cache_results]);
        } else if trie_s.len() >= self.num_trie_results {
            // Trie covers the cache's shortfall, capped at what it has.
            let take = (self.num_trie_results + (self.num_cache_results - cache_s.len()))
                .min(trie_s.len());
            out.extend_from_slice(&trie_s[..take]);
            out.extend(cache_s);
        } else if cache_s.len() >= self.num_cache_results {
            let take = (self.num_cache_results + (self.num_trie_results - trie_s.len()))
                .min(cache_s.len());
            out.extend(trie_s);
            out.extend_from_slice(&cache_s[..take]);
        } else {
            out.extend(trie_s);
            out.extend(cache_s);
        }
        out
    }
}

/// Drop later occurrences of already-seen words, preserving first-seen
/// order. Case-sensitive: the overlay has not run yet.
fn dedupe_first_seen(mut words: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    words.retain(|w| seen.insert(w.clone()));
    words
}

/// Uppercase each candidate at the positions where shift was held. A shift
/// sequence longer than a word truncates at the word; a shorter one leaves
/// the tail as stored. Skipped entirely when no shift was held.
fn apply_shift_overlay(words: Vec<String>, shifts: &[bool]) -> Vec<String> {
    if !shifts.iter().any(|&s| s) {
        return words;
    }
    words
        .into_iter()
        .map(|word| {
            word.chars()
                .enumerate()
                .map(|(i, c)| {
                    if shifts.get(i).copied().unwrap_or(false) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect()
        })
        .collect()
}
