
use tap_core::dict::Weight;
use tap_core::settings::EngineConfig;
use tempfile::TempDir;

use super::InputSession;

pub(super) fn make_session(entries: &[(Weight, &str)]) -> (TempDir, InputSession) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.tsv");
    let lines: String = entries
        .iter()
        .map(|(w, word)| format!("{w}\t{word}\n"))
        .collect();
    std::fs::write(&path, lines).unwrap();

    let config = EngineConfig {
        dictionary_path: path,
        // Deep enough that the first keystroke already reaches 5-letter
        // words; at the default depth a lone [2] would go straight to the
        // no-match state.
        suggestion_depth: 8,
        ..EngineConfig::default()
    };
    let session = InputSession::new(&config).unwrap();
    (dir, session)
}

// Helper: press a digit sequence without shift, returning the last
// suggestion list.
pub(super) fn type_digits(session: &mut InputSession, digits: &[u8]) -> Vec<String> {
    let mut last = Vec::new();
    for &d in digits {
        last = session.on_key_press(d, false);
    }
    last
}
