//! Stateful typing session over a [`PredictionEngine`].
//!
//! `InputSession` owns the in-progress word: the digit sequence typed so
//! far and the shift state of each keystroke. Hosts feed it one event per
//! UI gesture and render whatever suggestion list comes back.

#[cfg(test)]
mod tests;

use tracing::debug;

use tap_core::engine::{EngineError, PredictionEngine, SuggestionStatus};
use tap_core::keypad::{KeyDigit, KEY_MAX, KEY_MIN};
use tap_core::settings::EngineConfig;

/// Per-word input state machine.
///
/// The session mirrors what the user sees on screen: `keys` and `shifts`
/// grow and shrink together, one entry per keystroke of the current word,
/// and empty whenever no word is in progress.
pub struct InputSession {
    engine: PredictionEngine,
    keys: Vec<KeyDigit>,
    shifts: Vec<bool>,
}

impl InputSession {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            engine: PredictionEngine::new(config)?,
            keys: Vec::new(),
            shifts: Vec::new(),
        })
    }

    /// Digit sequence of the in-progress word.
    pub fn key_sequence(&self) -> &[KeyDigit] {
        &self.keys
    }

    pub fn status(&self) -> SuggestionStatus {
        self.engine.status()
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    /// Handle a digit keystroke and return the updated suggestion list.
    ///
    /// Once the engine has reported no matches for the current word, further
    /// keystrokes are not appended: the host is showing the raw digits by
    /// then, and a later backspace must land on the sequence the user last
    /// saw suggestions for.
    pub fn on_key_press(&mut self, digit: KeyDigit, shift: bool) -> Vec<String> {
        if !(KEY_MIN..=KEY_MAX).contains(&digit) {
            debug!(digit, "ignoring out-of-range key");
            return Vec::new();
        }
        if self.engine.status() == SuggestionStatus::None {
            return Vec::new();
        }

        self.keys.push(digit);
        self.shifts.push(shift);
        self.engine.query(&self.keys, &self.shifts)
    }

    /// Handle a backspace: drop the last keystroke and re-query. Shrinking
    /// the sequence is the one path that recovers from the no-match state.
    pub fn on_backspace(&mut self) -> Vec<String> {
        if self.keys.is_empty() {
            return Vec::new();
        }
        self.keys.pop();
        self.shifts.pop();
        self.engine.retract(&self.keys, &self.shifts)
    }

    /// The user picked `word` from the suggestion list (or typed it out and
    /// confirmed it). Records the choice and starts a fresh word. Returns
    /// whether the word was actually recorded.
    pub fn on_word_committed(&mut self, word: &str) -> bool {
        let recorded = self.engine.remember_choice(word);
        self.clear_word();
        recorded
    }

    /// A punctuation or symbol key ended the word without choosing a
    /// suggestion. The host inserts the symbol itself; nothing is recorded
    /// here, the session just rearms.
    pub fn on_punctuation_or_symbol_selected(&mut self, symbol: char) {
        debug!(%symbol, "word ended on symbol");
        self.clear_word();
    }

    /// Abandon the in-progress word entirely.
    pub fn on_clear(&mut self) {
        self.clear_word();
    }

    fn clear_word(&mut self) {
        self.keys.clear();
        self.shifts.clear();
        self.engine.reset();
    }
}
