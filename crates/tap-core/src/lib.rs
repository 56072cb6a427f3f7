//! Core prediction engine for multi-tap numeric keypads.
//!
//! `keypad` maps words to digit key sequences, `dict` holds the weighted
//! prefix trie and its TSV backing store, `cache` recalls recently chosen
//! words, and `engine` merges both sources into ranked suggestions.

pub mod cache;
pub mod dict;
pub mod engine;
pub mod keypad;
pub mod settings;
