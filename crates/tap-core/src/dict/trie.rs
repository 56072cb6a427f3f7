use std::collections::HashMap;

use tracing::{debug, warn};

use crate::keypad::{digits_for, KeyDigit, KeypadError, KEY_MAX, KEY_MIN};

use super::{DictError, DictStore, Weight};

pub const WEIGHT_DEFAULT: Weight = 1;
pub const SUGGESTION_DEPTH_DEFAULT: usize = 3;
pub const SUGGESTION_DEPTH_MIN: usize = 0;
pub const SUGGESTION_DEPTH_MAX: usize = 10;

/// A word and its mutable usage weight. Owned by exactly one trie node.
#[derive(Debug, Clone)]
pub struct WordWeight {
    pub word: String,
    pub weight: Weight,
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<KeyDigit, TrieNode>,
    /// Words whose digit path ends exactly here, sorted descending by
    /// weight. Equal weights keep insertion order (stable sort).
    word_weights: Vec<WordWeight>,
    leaf: bool,
}

/// Prefix tree keyed by digit sequences, mirrored to a `DictStore`.
///
/// Append/update-only: nodes are never deleted. The backing file is
/// rewritten in full on every weight change; a failed write is logged and
/// the in-memory update is kept, so memory and disk may diverge until the
/// next successful write.
#[derive(Debug)]
pub struct WeightedTrie {
    root: TrieNode,
    suggestion_depth: usize,
    store: DictStore,
}

impl WeightedTrie {
    /// Build the trie from the backing store. A missing, unreadable, or
    /// malformed dictionary file fails construction.
    pub fn open(store: DictStore, suggestion_depth: usize) -> Result<Self, DictError> {
        let depth = clamp_depth(suggestion_depth);
        let mut trie = Self {
            root: TrieNode::default(),
            suggestion_depth: depth,
            store,
        };
        for (weight, word) in trie.store.load()? {
            trie.insert(&word, weight)?;
        }
        Ok(trie)
    }

    pub fn suggestion_depth(&self) -> usize {
        self.suggestion_depth
    }

    /// Location of the backing dictionary file.
    pub fn store_path(&self) -> &std::path::Path {
        self.store.path()
    }

    /// Number of distinct words in the trie.
    pub fn word_count(&self) -> usize {
        fn count(node: &TrieNode) -> usize {
            node.word_weights.len() + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Insert a word at the node its digit path terminates on and re-sort
    /// that node's word list.
    pub fn insert(&mut self, word: &str, weight: Weight) -> Result<(), KeypadError> {
        let keys = digits_for(word)?;
        let mut node = &mut self.root;
        for key in keys {
            node = node.children.entry(key).or_default();
        }
        node.leaf = true;
        node.word_weights.push(WordWeight {
            word: word.to_string(),
            weight,
        });
        node.word_weights.sort_by(|a, b| b.weight.cmp(&a.weight));
        Ok(())
    }

    /// Walk `keys` to the node where the prefix ends.
    ///
    /// A miss on the *final* digit still resolves to the last reachable
    /// node and reports the prefix as existing; a miss anywhere earlier
    /// returns `(None, false)`. The driver depends on this final-digit
    /// tolerance, so it is load-bearing, not an accident.
    fn prefix_leaf(&self, keys: &[KeyDigit]) -> (Option<&TrieNode>, bool) {
        let mut node = &self.root;
        for (i, key) in keys.iter().enumerate() {
            match node.children.get(key) {
                Some(child) => node = child,
                None if i == keys.len() - 1 => return (Some(node), true),
                None => return (None, false),
            }
        }
        (Some(node), true)
    }

    fn prefix_node(&self, keys: &[KeyDigit]) -> Option<&TrieNode> {
        match self.prefix_leaf(keys) {
            (node, true) => node,
            _ => None,
        }
    }

    /// Ranked completions for a key sequence: the prefix node's own words
    /// (already weight-sorted) followed by deeper suggestions from up to
    /// `suggestion_depth` levels below it, shallow levels first.
    pub fn suggestions(&self, keys: &[KeyDigit]) -> Vec<String> {
        let Some(prefix_node) = self.prefix_node(keys) else {
            return Vec::new();
        };

        let mut suggestions: Vec<String> = prefix_node
            .word_weights
            .iter()
            .map(|ww| ww.word.clone())
            .collect();
        suggestions.extend(deeper_suggestions(prefix_node, self.suggestion_depth));
        suggestions
    }

    /// True if `word` is stored at the leaf its digit path points to.
    pub fn contains(&self, word: &str) -> bool {
        let Ok(keys) = digits_for(word) else {
            return false;
        };
        match self.prefix_leaf(&keys) {
            (Some(node), _) if node.leaf => {
                node.word_weights.iter().any(|ww| ww.word == word)
            }
            _ => false,
        }
    }

    /// Bump `word`'s weight by one, inserting it at the default weight if
    /// absent — this is also how new words enter the dictionary. The change
    /// is mirrored to the backing store; a write failure is logged and the
    /// in-memory update stands.
    pub fn update_weight(&mut self, word: &str) -> Result<Weight, KeypadError> {
        let keys = digits_for(word)?;
        let new_weight = if self.contains(word) {
            // contains() guarantees the full exact path is present
            let mut node = &mut self.root;
            for key in &keys {
                node = node
                    .children
                    .get_mut(key)
                    .unwrap_or_else(|| unreachable!("path verified by contains()"));
            }
            let ww = node
                .word_weights
                .iter_mut()
                .find(|ww| ww.word == word)
                .unwrap_or_else(|| unreachable!("word verified by contains()"));
            ww.weight += 1;
            let updated = ww.weight;
            node.word_weights.sort_by(|a, b| b.weight.cmp(&a.weight));
            updated
        } else {
            self.insert(word, WEIGHT_DEFAULT)?;
            WEIGHT_DEFAULT
        };

        debug!(word, weight = new_weight, "weight updated");
        if let Err(e) = self.persist() {
            warn!("dictionary write failed, in-memory state kept: {e}");
        }
        Ok(new_weight)
    }

    /// All `(weight, word)` pairs in deterministic digit order.
    pub fn entries(&self) -> Vec<(Weight, String)> {
        fn collect(node: &TrieNode, out: &mut Vec<(Weight, String)>) {
            for ww in &node.word_weights {
                out.push((ww.weight, ww.word.clone()));
            }
            for key in KEY_MIN..=KEY_MAX {
                if let Some(child) = node.children.get(&key) {
                    collect(child, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.root, &mut out);
        out
    }

    /// Rewrite the backing store from the in-memory trie.
    pub fn persist(&self) -> Result<(), DictError> {
        self.store.save(&self.entries())
    }
}

/// Breadth-first probe below `prefix_node`: one bucket per level, each
/// bucket independently weight-sorted, buckets concatenated shallow to
/// deep. Shorter completions surface first; within a length class,
/// frequency wins.
fn deeper_suggestions(prefix_node: &TrieNode, depth: usize) -> Vec<String> {
    let mut suggestions = Vec::new();
    let mut frontier: Vec<&TrieNode> = prefix_node.children.values().collect();

    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let mut bucket: Vec<&WordWeight> = frontier
            .iter()
            .flat_map(|node| node.word_weights.iter())
            .collect();
        bucket.sort_by(|a, b| b.weight.cmp(&a.weight));
        suggestions.extend(bucket.into_iter().map(|ww| ww.word.clone()));

        frontier = frontier
            .iter()
            .flat_map(|node| node.children.values())
            .collect();
    }

    suggestions
}

// The low bound of the [SUGGESTION_DEPTH_MIN, SUGGESTION_DEPTH_MAX] range
// is unreachable for an unsigned depth, so only the high side clamps.
pub(crate) fn clamp_depth(depth: usize) -> usize {
    if depth > SUGGESTION_DEPTH_MAX {
        warn!(
            depth,
            max = SUGGESTION_DEPTH_MAX,
            "suggestion depth too high, clamping"
        );
        return SUGGESTION_DEPTH_MAX;
    }
    depth
}
