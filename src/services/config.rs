//! Engine Configuration
//!
//! JSON-loadable configuration for the guidance engine. Every field has a
//! default so a missing or partial file still yields a working config.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::error::AppResult;

/// Configuration for corpus loading and guidance composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory of reference source documents
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: PathBuf,
    /// Ranked prompts fed into a guidance composition
    #[serde(default = "default_top_relevant")]
    pub top_relevant: usize,
    /// Random prompts sampled for inspiration
    #[serde(default = "default_inspiration_sample")]
    pub inspiration_sample: usize,
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("reference_prompts")
}

fn default_top_relevant() -> usize {
    5
}

fn default_inspiration_sample() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            top_relevant: default_top_relevant(),
            inspiration_sample: default_inspiration_sample(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to load engine config from {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
