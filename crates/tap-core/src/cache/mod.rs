//! Bounded recency cache shadowing the weighted trie.
//!
//! A second, unweighted digit trie holding only the most recently chosen
//! words, paired with an MRU list. When the cache overflows, the least
//! recently used word is evicted and its now-empty trie branch collapses.
//!
//! Nodes live in an index-based arena: children and parents are `usize`
//! slots into `nodes`, so the upward back-reference needed for pruning
//! never forms an ownership cycle. Freed slots are recycled.


use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::dict::clamp_depth;
use crate::keypad::{digits_for, KeyDigit};

pub const CACHE_SIZE_DEFAULT: usize = 25;
pub const CACHE_SIZE_MIN: usize = 10;
pub const CACHE_SIZE_MAX: usize = 100;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct CacheNode {
    parent: Option<usize>,
    children: HashMap<KeyDigit, usize>,
    /// Bare words, insertion order. A node is a word terminus iff this is
    /// non-empty; pruning keeps that accurate.
    words: Vec<String>,
}

#[derive(Debug)]
pub struct RecencyCache {
    nodes: Vec<CacheNode>,
    /// Recycled arena slots from pruned branches.
    free: Vec<usize>,
    /// Resident words, most recently used first. Always mirrors the set of
    /// words reachable in the trie, and never exceeds `size_limit`.
    recency: VecDeque<String>,
    size_limit: usize,
    suggestion_depth: usize,
}

impl RecencyCache {
    pub fn new(size_limit: usize, suggestion_depth: usize) -> Self {
        Self {
            nodes: vec![CacheNode::default()],
            free: Vec::new(),
            recency: VecDeque::new(),
            size_limit: clamp_size(size_limit),
            suggestion_depth: clamp_depth(suggestion_depth),
        }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    pub fn len(&self) -> usize {
        self.recency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recency.is_empty()
    }

    /// Resident words, most recently used first.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.recency.iter().map(String::as_str)
    }

    /// Unranked completions for a key sequence: the prefix node's own words
    /// in insertion order, then deeper words level by level. The cache is
    /// small by construction, so no weight sort applies.
    pub fn suggestions(&self, keys: &[KeyDigit]) -> Vec<String> {
        let Some(prefix) = self.prefix_node(keys) else {
            return Vec::new();
        };

        let mut suggestions = self.nodes[prefix].words.clone();
        let mut frontier: Vec<usize> = self.nodes[prefix].children.values().copied().collect();
        for _ in 0..self.suggestion_depth {
            if frontier.is_empty() {
                break;
            }
            for &idx in &frontier {
                suggestions.extend(self.nodes[idx].words.iter().cloned());
            }
            frontier = frontier
                .iter()
                .flat_map(|&idx| self.nodes[idx].children.values().copied())
                .collect();
        }
        suggestions
    }

    /// Record a chosen word. Already-resident words move to the front of
    /// the recency list; new words evict the least recently used entry
    /// first when the cache is at capacity.
    pub fn commit(&mut self, word: &str) {
        let keys = match digits_for(word) {
            Ok(keys) => keys,
            Err(e) => {
                // Callers validate before committing; an unmappable word
                // here would desynchronize the list and trie, so drop it.
                warn!("cache commit rejected: {e}");
                return;
            }
        };

        if let Some(pos) = self.recency.iter().position(|w| w == word) {
            let resident = self.recency.remove(pos).unwrap_or_else(|| {
                unreachable!("position() returned a valid index")
            });
            self.recency.push_front(resident);
            return;
        }

        if self.recency.len() == self.size_limit {
            if let Some(oldest) = self.recency.pop_back() {
                debug!(word = %oldest, "evicting least recently used");
                self.prune(&oldest);
            }
        }
        self.insert(word, &keys);
        self.recency.push_front(word.to_string());
    }

    fn insert(&mut self, word: &str, keys: &[KeyDigit]) {
        let mut node = ROOT;
        for &key in keys {
            node = match self.nodes[node].children.get(&key) {
                Some(&child) => child,
                None => {
                    let child = self.alloc(node);
                    self.nodes[node].children.insert(key, child);
                    child
                }
            };
        }
        self.nodes[node].words.push(word.to_string());
    }

    /// Remove `word` from its leaf, then collapse empty nodes upward,
    /// stopping at the first ancestor that still has other children or
    /// words of its own (or the root).
    fn prune(&mut self, word: &str) {
        let Ok(keys) = digits_for(word) else {
            return;
        };
        let mut node = ROOT;
        for key in &keys {
            match self.nodes[node].children.get(key) {
                Some(&child) => node = child,
                None => return,
            }
        }

        self.nodes[node].words.retain(|w| w != word);

        let mut idx = node;
        while idx != ROOT
            && self.nodes[idx].words.is_empty()
            && self.nodes[idx].children.is_empty()
        {
            let Some(parent) = self.nodes[idx].parent else {
                break;
            };
            self.nodes[parent].children.retain(|_, &mut child| child != idx);
            self.free_slot(idx);
            idx = parent;
        }
    }

    fn alloc(&mut self, parent: usize) -> usize {
        let node = CacheNode {
            parent: Some(parent),
            ..CacheNode::default()
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn free_slot(&mut self, idx: usize) {
        self.nodes[idx] = CacheNode::default();
        self.free.push(idx);
    }

    /// Same final-digit tolerance as the weighted trie: a miss on the last
    /// digit resolves to the last reachable node.
    fn prefix_node(&self, keys: &[KeyDigit]) -> Option<usize> {
        let mut node = ROOT;
        for (i, key) in keys.iter().enumerate() {
            match self.nodes[node].children.get(key) {
                Some(&child) => node = child,
                None if i == keys.len() - 1 => return Some(node),
                None => return None,
            }
        }
        Some(node)
    }

    /// Live (non-freed, non-root) node count. Diagnostic; used to verify
    /// that pruning collapses branches.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len() - 1
    }

    /// All words reachable in the trie, for cross-checking against the
    /// recency list.
    pub fn trie_words(&self) -> Vec<String> {
        let mut words = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            words.extend(self.nodes[idx].words.iter().cloned());
            stack.extend(self.nodes[idx].children.values().copied());
        }
        words
    }
}

fn clamp_size(size: usize) -> usize {
    if size < CACHE_SIZE_MIN {
        warn!(size, min = CACHE_SIZE_MIN, "cache size too low, clamping");
        CACHE_SIZE_MIN
    } else if size > CACHE_SIZE_MAX {
        warn!(size, max = CACHE_SIZE_MAX, "cache size too high, clamping");
        CACHE_SIZE_MAX
    } else {
        size
    }
}
