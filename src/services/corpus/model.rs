//! Reference Prompt Data Types
//!
//! Core types for the reference prompt corpus: captured real provider system
//! prompts used as structural and quality benchmarks.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Normalized provider classification for a reference prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    OpenAI,
    Anthropic,
    Google,
    XAI,
    Meta,
    Other,
}

impl ProviderCategory {
    /// Whether this is one of the major hosted providers
    /// (drives the relevance scorer's provider bonus).
    pub fn is_major(&self) -> bool {
        matches!(
            self,
            ProviderCategory::OpenAI | ProviderCategory::Anthropic | ProviderCategory::Google
        )
    }
}

impl std::fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderCategory::OpenAI => write!(f, "OpenAI"),
            ProviderCategory::Anthropic => write!(f, "Anthropic"),
            ProviderCategory::Google => write!(f, "Google"),
            ProviderCategory::XAI => write!(f, "xAI"),
            ProviderCategory::Meta => write!(f, "Meta"),
            ProviderCategory::Other => write!(f, "Other"),
        }
    }
}

/// Semantic label inferred from a reference prompt's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTag {
    Assistant,
    Creative,
    Coding,
    Analysis,
    Safety,
}

impl PromptTag {
    /// Lowercase tag name, matching the capability-keyword vocabulary.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTag::Assistant => "assistant",
            PromptTag::Creative => "creative",
            PromptTag::Coding => "coding",
            PromptTag::Analysis => "analysis",
            PromptTag::Safety => "safety",
        }
    }
}

impl std::fmt::Display for PromptTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A captured provider system prompt, immutable for the process lifetime.
///
/// Created once at corpus-load time from a source document named
/// `<provider>-<model>_<date>.<ext>`; never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePrompt {
    /// Unique ID derived from the source file stem (normalized)
    pub id: String,
    /// Source file stem, unmodified
    pub name: String,
    /// Raw provider token from the filename (e.g. "openai")
    pub provider: String,
    /// Raw model token from the filename (e.g. "chatgpt4o")
    pub model: String,
    /// Capture date token; "unknown" when the filename carries none
    pub date: String,
    /// Full text body (always non-empty; empty-body entries are dropped at load)
    pub content: String,
    /// Normalized provider classification
    pub category: ProviderCategory,
    /// Semantic labels inferred from content (possibly empty)
    pub tags: Vec<PromptTag>,
}

impl ReferencePrompt {
    /// Capture year, parsed from the date token.
    ///
    /// Accepts `YYYYMMDD` dates and falls back to a bare leading year for
    /// partial tokens. Returns None for "unknown" or unparseable dates.
    pub fn year(&self) -> Option<i32> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.date, "%Y%m%d") {
            return Some(date.year());
        }
        self.date.get(..4)?.parse::<i32>().ok()
    }

    /// Whether this prompt carries the given tag.
    pub fn has_tag(&self, tag: PromptTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Statistics about a loaded corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total: usize,
    pub openai_count: usize,
    pub anthropic_count: usize,
    pub google_count: usize,
    pub xai_count: usize,
    pub meta_count: usize,
    pub other_count: usize,
    /// Entries carrying at least one semantic tag
    pub tagged_count: usize,
}
