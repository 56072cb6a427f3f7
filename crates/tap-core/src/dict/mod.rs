//! Weighted digit-trie dictionary and its TSV backing store.
//!
//! `WeightedTrie` keeps (word, weight) pairs on the trie node where the
//! word's digit path terminates. `DictStore` owns the newline-delimited
//! `weight<TAB>word` file the trie is loaded from and mirrored back to.

mod store;
mod trie;

pub use store::DictStore;
pub(crate) use trie::clamp_depth;
pub use trie::{
    WeightedTrie, WordWeight, SUGGESTION_DEPTH_DEFAULT, SUGGESTION_DEPTH_MAX,
    SUGGESTION_DEPTH_MIN, WEIGHT_DEFAULT,
};

use std::io;

use crate::keypad::KeypadError;

/// Frequency/usage score used to rank same-prefix candidates.
pub type Weight = u64;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error(transparent)]
    Keypad(#[from] KeypadError),
}
