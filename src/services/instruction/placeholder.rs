//! Instruction Placeholder Classifier
//!
//! Decides whether a candidate instruction string is meaningful or
//! generic/placeholder text. Rule-based: a minimum-length gate followed by a
//! fixed table of case-insensitive patterns for common generic phrases.

use regex::Regex;

/// Trimmed instructions shorter than this are too short to carry meaningful,
/// specific guidance.
pub const MIN_MEANINGFUL_LENGTH: usize = 50;

/// Classifier with compiled generic-phrase patterns.
///
/// Pure and deterministic; construct once and reuse.
pub struct PlaceholderClassifier {
    patterns: Vec<Regex>,
}

impl Default for PlaceholderClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderClassifier {
    /// Create a new classifier with compiled patterns.
    pub fn new() -> Self {
        Self {
            patterns: Self::compile_patterns(&[
                // Exact generic phrases (optional trailing punctuation)
                r"(?i)^you\s+are\s+a\s+helpful\s+(ai\s+)?assistant[.!]?$",
                r"(?i)^(a\s+)?helpful\s+assistant[.!]?$",
                r"(?i)^you\s+are\s+an\s+ai[.!]?$",
                r"(?i)^assistant[.!]?$",
                r"(?i)^ai[.!]?$",
                r"(?i)^bot[.!]?$",
                r"(?i)^chatbot[.!]?$",
                // Generic prefixes
                r"(?i)^enter\s+your",
                r"(?i)^type\s+your",
                r"(?i)^placeholder",
                r"(?i)^for\s+example",
                r"(?i)^e\.g\.",
                r"(?i)^your\s+instructions?\s+here",
                r"(?i)^lorem\s+ipsum",
            ]),
        }
    }

    /// Classify an instruction string as placeholder or meaningful.
    ///
    /// Trims whitespace; anything under [`MIN_MEANINGFUL_LENGTH`] characters
    /// is a placeholder (empty strings included), and longer strings are
    /// placeholders when they match a generic-phrase pattern.
    pub fn is_placeholder(&self, text: &str) -> bool {
        let trimmed = text.trim();

        if trimmed.chars().count() < MIN_MEANINGFUL_LENGTH {
            return true;
        }

        self.patterns.iter().any(|p| p.is_match(trimmed))
    }

    fn compile_patterns(raw: &[&str]) -> Vec<Regex> {
        raw.iter().filter_map(|p| Regex::new(p).ok()).collect()
    }
}
