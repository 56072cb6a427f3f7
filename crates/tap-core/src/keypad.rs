//! Static digit↔letter keypad table.
//!
//! The table is an immutable process-wide constant: digits 2–9 carry the
//! alphabet, digit 1 carries punctuation symbols, and digit 10 is the
//! space/zero key. Every lowercase letter maps to exactly one digit.

use thiserror::Error;

/// A single keypad digit, 1–10 (10 is the space/"0" key).
pub type KeyDigit = u8;

/// Ordered digit presses for the word typed so far.
pub type KeySequence = Vec<KeyDigit>;

pub const KEY_MIN: KeyDigit = 1;
pub const KEY_MAX: KeyDigit = 10;
pub const KEY_PUNCTUATION: KeyDigit = 1;
pub const KEY_SPACE: KeyDigit = 10;

/// Letter mode: what each key prints, indexed by digit.
const ALPHABET_ROWS: [(KeyDigit, &[char]); 10] = [
    (1, &['@', '/', '.']),
    (2, &['a', 'b', 'c']),
    (3, &['d', 'e', 'f']),
    (4, &['g', 'h', 'i']),
    (5, &['j', 'k', 'l']),
    (6, &['m', 'n', 'o']),
    (7, &['p', 'q', 'r', 's']),
    (8, &['t', 'u', 'v']),
    (9, &['w', 'x', 'y', 'z']),
    (10, &[' ']),
];

/// Number mode: each key prints its own numeral (10 prints "0").
const NUMBER_ROWS: [(KeyDigit, char); 10] = [
    (1, '1'),
    (2, '2'),
    (3, '3'),
    (4, '4'),
    (5, '5'),
    (6, '6'),
    (7, '7'),
    (8, '8'),
    (9, '9'),
    (10, '0'),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeypadError {
    #[error("no keypad digit for character {0:?}")]
    Unmappable(char),
}

/// The digit a character lives on, or `None` for anything the keypad
/// cannot type in letter mode. Case-insensitive for letters.
pub fn digit_for(c: char) -> Option<KeyDigit> {
    match c.to_ascii_lowercase() {
        'a'..='c' => Some(2),
        'd'..='f' => Some(3),
        'g'..='i' => Some(4),
        'j'..='l' => Some(5),
        'm'..='o' => Some(6),
        'p'..='s' => Some(7),
        't'..='v' => Some(8),
        'w'..='z' => Some(9),
        ' ' => Some(KEY_SPACE),
        _ => None,
    }
}

/// Characters printed by `digit` in letter mode.
pub fn letters_for(digit: KeyDigit) -> &'static [char] {
    ALPHABET_ROWS
        .iter()
        .find(|(d, _)| *d == digit)
        .map(|(_, chars)| *chars)
        .unwrap_or(&[])
}

/// The numeral printed by `digit` in number mode.
pub fn numeral_for(digit: KeyDigit) -> Option<char> {
    NUMBER_ROWS
        .iter()
        .find(|(d, _)| *d == digit)
        .map(|(_, c)| *c)
}

/// Convert a word to its digit key sequence, one digit per character.
/// Fails on the first character without a keypad mapping.
pub fn digits_for(word: &str) -> Result<KeySequence, KeypadError> {
    word.chars()
        .map(|c| digit_for(c).ok_or(KeypadError::Unmappable(c)))
        .collect()
}
