use std::fs;
use std::process;

use tap_core::dict::{
    DictStore, Weight, WeightedTrie, SUGGESTION_DEPTH_DEFAULT, WEIGHT_DEFAULT,
};
use tap_core::keypad::digits_for;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn validate(dict_file: &str) {
    // Opening the trie checks both the file format and that every word
    // is typeable.
    let trie = die!(
        WeightedTrie::open(DictStore::new(dict_file), SUGGESTION_DEPTH_DEFAULT),
        "Error loading dictionary: {}"
    );
    eprintln!("OK: {} words", trie.word_count());
}

pub fn stats(dict_file: &str) {
    let entries = die!(
        DictStore::new(dict_file).load(),
        "Error loading dictionary: {}"
    );
    let total: Weight = entries.iter().map(|(w, _)| w).sum();
    let max = entries.iter().max_by_key(|(w, _)| w);

    println!("entries:      {}", entries.len());
    println!("total weight: {total}");
    if let Some((weight, word)) = max {
        println!("heaviest:     {word} ({weight})");
    }
}

pub fn top(dict_file: &str, n: usize) {
    let mut entries = die!(
        DictStore::new(dict_file).load(),
        "Error loading dictionary: {}"
    );
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    for (weight, word) in entries.iter().take(n) {
        println!("{weight}\t{word}");
    }
}

pub fn add(dict_file: &str, word: &str, weight: Weight) {
    die!(digits_for(word), "Error: word is not typeable: {}");

    let store = DictStore::new(dict_file);
    let mut entries = store.load().unwrap_or_default();
    if entries.iter().any(|(_, w)| w == word) {
        eprintln!("Error: {word:?} is already in the dictionary");
        process::exit(1);
    }
    entries.push((weight, word.to_string()));
    die!(store.save(&entries), "Error writing dictionary: {}");
    eprintln!("Added {word:?} at weight {weight}");
}

/// Seed a dictionary from a plain wordlist, one word per line. Lines that
/// cannot be typed on the keypad are skipped with a note.
pub fn from_wordlist(input_file: &str, output_file: &str) {
    let text = die!(
        fs::read_to_string(input_file),
        "Error reading {input_file}: {}"
    );

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        match digits_for(word) {
            Ok(_) => entries.push((WEIGHT_DEFAULT, word.to_string())),
            Err(e) => {
                eprintln!("skipping {word:?}: {e}");
                skipped += 1;
            }
        }
    }

    die!(
        DictStore::new(output_file).save(&entries),
        "Error writing dictionary: {}"
    );
    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file}: {} entries, {skipped} skipped ({:.1} KB)",
        entries.len(),
        file_size as f64 / 1024.0
    );
}

pub fn encode(word: &str) {
    let keys = die!(digits_for(word), "Error: {}");
    let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    println!("{}", rendered.join(" "));
}
