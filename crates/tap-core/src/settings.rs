//! Engine configuration, deserialized from TOML.
//!
//! Unlike a global singleton, configuration here is constructor-time and
//! fixed for the engine's lifetime: each `PredictionEngine` owns the values
//! it was built with. Out-of-range suggestion depth and cache size are
//! clamped by the components that consume them; only the result-quota
//! relation is rejected outright.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::CACHE_SIZE_DEFAULT;
use crate::dict::SUGGESTION_DEPTH_DEFAULT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("config file error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// TSV dictionary backing the weighted trie.
    pub dictionary_path: PathBuf,
    /// Extra digit-levels explored below an exact prefix match; clamped to
    /// [0, 10] by the trie.
    pub suggestion_depth: usize,
    /// Total candidates returned per query.
    pub num_results: usize,
    /// Portion of `num_results` reserved for the recency cache; must be
    /// strictly less than `num_results`.
    pub num_cache_results: usize,
    /// Resident-word bound for the recency cache; clamped to [10, 100].
    pub cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("dict.tsv"),
            suggestion_depth: SUGGESTION_DEPTH_DEFAULT,
            num_results: 20,
            num_cache_results: 10,
            cache_size: CACHE_SIZE_DEFAULT,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_results == 0 {
            return Err(ConfigError::InvalidValue {
                field: "num_results".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.num_cache_results >= self.num_results {
            return Err(ConfigError::InvalidValue {
                field: "num_cache_results".to_string(),
                reason: "must be less than num_results".to_string(),
            });
        }
        Ok(())
    }
}
