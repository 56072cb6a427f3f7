use std::fs;
use std::path::{Path, PathBuf};

use super::{DictError, Weight};

/// Newline-delimited `weight<TAB>word` dictionary file.
///
/// The whole file is read once at load; every mutation rewrites it in full
/// through a `.tmp` sibling and an atomic rename, so a crash mid-write
/// never corrupts existing entries.
#[derive(Debug)]
pub struct DictStore {
    path: PathBuf,
}

impl DictStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records. Reading stops at the first blank line; any
    /// malformed record before that fails the whole load.
    pub fn load(&self) -> Result<Vec<(Weight, String)>, DictError> {
        let contents = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();

        for (i, line) in contents.lines().enumerate() {
            if line.is_empty() {
                break;
            }
            let (weight_field, word) =
                line.split_once('\t').ok_or_else(|| DictError::Malformed {
                    line: i + 1,
                    reason: "expected weight<TAB>word".to_string(),
                })?;
            let weight: Weight =
                weight_field
                    .parse()
                    .map_err(|_| DictError::Malformed {
                        line: i + 1,
                        reason: format!("invalid weight {weight_field:?}"),
                    })?;
            if word.is_empty() {
                return Err(DictError::Malformed {
                    line: i + 1,
                    reason: "empty word".to_string(),
                });
            }
            entries.push((weight, word.to_string()));
        }

        Ok(entries)
    }

    /// Atomic write: serialize to `.tmp` then rename over the original.
    pub fn save(&self, entries: &[(Weight, String)]) -> Result<(), DictError> {
        let mut buf = String::new();
        for (weight, word) in entries {
            buf.push_str(&weight.to_string());
            buf.push('\t');
            buf.push_str(word);
            buf.push('\n');
        }

        let tmp = self.path.with_extension("tmp");
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
