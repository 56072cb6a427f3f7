use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use tap_core::settings::EngineConfig;
use tap_session::InputSession;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn open_session(dict_file: &str, config_file: Option<&str>) -> InputSession {
    let mut config = match config_file {
        Some(path) => die!(
            EngineConfig::from_toml_file(Path::new(path)),
            "Error reading config: {}"
        ),
        None => EngineConfig::default(),
    };
    config.dictionary_path = PathBuf::from(dict_file);
    die!(InputSession::new(&config), "Error opening engine: {}")
}

fn parse_digits(digits: &str) -> Option<Vec<u8>> {
    digits
        .chars()
        .map(|c| match c {
            '0' => Some(10),
            '1'..='9' => Some(c as u8 - b'0'),
            _ => None,
        })
        .collect()
}

/// One-shot query: press a digit string and print the suggestions.
pub fn suggest(dict_file: &str, digits: &str, config_file: Option<&str>) {
    let Some(keys) = parse_digits(digits) else {
        eprintln!("Error: digits must be 0-9 (0 is the space key)");
        process::exit(1);
    };

    let mut session = open_session(dict_file, config_file);
    let mut suggestions = Vec::new();
    for key in keys {
        suggestions = session.on_key_press(key, false);
    }

    if suggestions.is_empty() {
        eprintln!("(no suggestions)");
    }
    for (i, word) in suggestions.iter().enumerate() {
        println!("{:2}. {word}", i + 1);
    }
}

/// Interactive typing loop on stdin.
///
/// Commands per line: digits to press (uppercase the next press with a
/// leading `^`), `b` backspace, `!word` commit a word, `.` end the word
/// on punctuation, `c` clear, `q` quit.
pub fn repl(dict_file: &str, config_file: Option<&str>) {
    let mut session = open_session(dict_file, config_file);
    let stdin = io::stdin();

    eprintln!("digits press keys, b=backspace, !word=commit, .=punctuation, c=clear, q=quit");
    prompt(&session);
    for line in stdin.lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        let input = line.trim();

        match input {
            "" => {}
            "q" => break,
            "b" => show(session.on_backspace()),
            "." => {
                session.on_punctuation_or_symbol_selected('.');
                eprintln!("(word ended)");
            }
            "c" => {
                session.on_clear();
                eprintln!("(cleared)");
            }
            _ if input.starts_with('!') => {
                let word = &input[1..];
                if session.on_word_committed(word) {
                    eprintln!("(recorded {word:?})");
                } else {
                    eprintln!("(rejected {word:?})");
                }
            }
            _ => {
                let mut shift = false;
                let mut suggestions = Vec::new();
                let mut bad = false;
                for c in input.chars() {
                    if c == '^' {
                        shift = true;
                        continue;
                    }
                    match parse_digits(&c.to_string()) {
                        Some(keys) => {
                            suggestions = session.on_key_press(keys[0], shift);
                            shift = false;
                        }
                        None => {
                            eprintln!("unrecognized input {c:?}");
                            bad = true;
                            break;
                        }
                    }
                }
                if !bad {
                    show(suggestions);
                }
            }
        }
        prompt(&session);
    }
}

fn prompt(session: &InputSession) {
    let keys: Vec<String> = session
        .key_sequence()
        .iter()
        .map(|k| if *k == 10 { "0".into() } else { k.to_string() })
        .collect();
    eprint!("[{}] ({:?})> ", keys.join(""), session.status());
    let _ = io::stderr().flush();
}

fn show(suggestions: Vec<String>) {
    if suggestions.is_empty() {
        eprintln!("(no suggestions)");
        return;
    }
    for (i, word) in suggestions.iter().enumerate() {
        println!("{:2}. {word}", i + 1);
    }
}
