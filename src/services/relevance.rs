//! Relevance Scoring
//!
//! Ranks reference prompts against free-text user input using token-overlap
//! and tag heuristics. Additive, deterministic, and stable: identical
//! corpus/query pairs always yield identical rankings.

use crate::services::corpus::model::{PromptTag, ReferencePrompt};

/// Tag bonuses: the prompt carries the tag AND the user text contains the
/// paired keyword.
const TAG_KEYWORD_BONUSES: &[(PromptTag, &str)] = &[
    (PromptTag::Assistant, "assistant"),
    (PromptTag::Creative, "creative"),
    (PromptTag::Coding, "code"),
    (PromptTag::Analysis, "analyze"),
];

/// Score a single prompt against user text.
///
/// - +1 per whitespace-delimited token longer than 3 characters appearing as
///   a case-insensitive substring of the prompt content
/// - +2 per tag/keyword pair hit
/// - +1 for major providers (OpenAI, Anthropic, Google)
pub fn score_prompt(prompt: &ReferencePrompt, user_text: &str) -> u32 {
    let content_lower = prompt.content.to_lowercase();
    let text_lower = user_text.to_lowercase();

    let mut score = 0u32;

    for token in text_lower
        .split_whitespace()
        .filter(|t| t.chars().count() > 3)
    {
        if content_lower.contains(token) {
            score += 1;
        }
    }

    for (tag, keyword) in TAG_KEYWORD_BONUSES {
        if prompt.has_tag(*tag) && text_lower.contains(keyword) {
            score += 2;
        }
    }

    if prompt.category.is_major() {
        score += 1;
    }

    score
}

/// Rank prompts by descending score, truncated to `top_n`.
///
/// The sort is stable: ties keep corpus iteration order.
pub fn rank_prompts(
    prompts: &[ReferencePrompt],
    user_text: &str,
    top_n: usize,
) -> Vec<ReferencePrompt> {
    let mut scored: Vec<(&ReferencePrompt, u32)> = prompts
        .iter()
        .map(|p| (p, score_prompt(p, user_text)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(top_n)
        .map(|(p, _)| p.clone())
        .collect()
}
