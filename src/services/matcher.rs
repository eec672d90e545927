//! Model-to-Prompt Matcher
//!
//! Finds the corpus entry that best represents a target model: an exact match
//! via a static provider/model/version pattern table, else scored fallback
//! candidates with a confidence value.
//!
//! The exact-match table is a closed, hardcoded list tied to specific capture
//! version tokens. New model versions stop producing exact matches until the
//! table is extended; fallback scoring carries the result in the meantime.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::corpus::model::ReferencePrompt;
use crate::services::corpus::store::PromptCorpus;
use crate::utils::error::AppResult;
use promptsmith_core::{ModelProvider, ModelRegistry};

/// Number of fallback matches returned (best first)
const FALLBACK_TOP_N: usize = 3;

/// Captures from this year onward count as recent
const RECENT_YEAR: i32 = 2024;

/// Result of matching a model against the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMatch {
    pub model_id: String,
    pub model_name: String,
    pub provider: ModelProvider,
    pub exact_match: Option<ReferencePrompt>,
    /// Scored fallback candidates, best first (at most 3)
    pub fallback_matches: Vec<ReferencePrompt>,
    /// Heuristic match quality in [0.3, 0.95]
    pub confidence: f64,
    /// Which branch was taken and the top result, for observability
    pub reasoning: String,
}

/// One entry of the static exact-match table
struct ExactPattern {
    /// Applies when the model id contains this fragment
    id_fragment: &'static str,
    /// Corpus provider token the prompt's provider must contain
    provider: &'static str,
    /// Token the prompt's id or model must contain
    model: &'static str,
    /// Capture version token the prompt's id must contain, when pinned
    version: Option<&'static str>,
}

/// Static exact-match patterns. Closed list; corpus order breaks ties.
const EXACT_PATTERNS: &[ExactPattern] = &[
    ExactPattern {
        id_fragment: "gpt-4.1",
        provider: "openai",
        model: "chatgpt4o",
        version: Some("20250506"),
    },
    ExactPattern {
        id_fragment: "gpt-4.1",
        provider: "openai",
        model: "chatgpt4o",
        version: Some("20241210"),
    },
    ExactPattern {
        id_fragment: "gpt-4o",
        provider: "openai",
        model: "chatgpt4o",
        version: None,
    },
    ExactPattern {
        id_fragment: "o3",
        provider: "openai",
        model: "o3",
        version: None,
    },
    ExactPattern {
        id_fragment: "deepseek",
        provider: "deepseek",
        model: "deepseek",
        version: None,
    },
    ExactPattern {
        id_fragment: "gemini-2.5",
        provider: "google",
        model: "gemini-1.5",
        version: None,
    },
    ExactPattern {
        id_fragment: "gemini-1.5",
        provider: "google",
        model: "gemini-1.5",
        version: None,
    },
];

/// Provider-family aliases for fallback scoring
fn provider_aliases(provider: ModelProvider) -> &'static [&'static str] {
    match provider {
        ModelProvider::OpenAI => &["openai", "chatgpt", "gpt"],
        ModelProvider::DeepSeek => &["deepseek"],
        ModelProvider::Google => &["google", "gemini", "bard"],
    }
}

/// Model families keyed by model-id fragment, with corpus alias tokens
const MODEL_FAMILIES: &[(&str, &[&str])] = &[
    ("gpt-4", &["gpt4", "gpt-4", "chatgpt4"]),
    ("o3", &["o3"]),
    ("gemini", &["gemini"]),
    ("deepseek", &["deepseek"]),
];

/// Matches target models against the corpus snapshot.
pub struct ModelMatcher {
    corpus: Arc<PromptCorpus>,
    registry: Arc<ModelRegistry>,
}

impl ModelMatcher {
    pub fn new(corpus: Arc<PromptCorpus>, registry: Arc<ModelRegistry>) -> Self {
        Self { corpus, registry }
    }

    /// Match a model id against the corpus.
    ///
    /// Errors on unknown model ids (caller-input error, not retried).
    /// `confidence` is always within [0.3, 0.95].
    pub fn match_model(&self, model_id: &str) -> AppResult<ModelMatch> {
        let config = self.registry.require(model_id)?;

        let exact_match = self.find_exact_match(model_id).cloned();

        // Fallback candidates are always computed; they feed the result only
        // when no exact match exists, but confidence counting needs the full
        // scored set either way.
        let scored = self.score_fallbacks(model_id, config.provider, &config.capabilities);
        let scored_total = scored.len();
        let top_is_recent = scored
            .first()
            .and_then(|(p, _)| p.year())
            .map(|y| y >= RECENT_YEAR)
            .unwrap_or(false);
        let fallback_matches: Vec<ReferencePrompt> = scored
            .into_iter()
            .take(FALLBACK_TOP_N)
            .map(|(p, _)| p.clone())
            .collect();

        let confidence = compute_confidence(exact_match.is_some(), scored_total, top_is_recent);
        let reasoning = build_reasoning(model_id, &exact_match, &fallback_matches, scored_total);

        Ok(ModelMatch {
            model_id: model_id.to_string(),
            model_name: config.display_name.clone(),
            provider: config.provider,
            exact_match,
            fallback_matches,
            confidence,
            reasoning,
        })
    }

    /// Scan the corpus for the first entry matching any applicable pattern.
    fn find_exact_match(&self, model_id: &str) -> Option<&ReferencePrompt> {
        let applicable: Vec<&ExactPattern> = EXACT_PATTERNS
            .iter()
            .filter(|p| model_id.contains(p.id_fragment))
            .collect();
        if applicable.is_empty() {
            return None;
        }

        self.corpus.all().iter().find(|prompt| {
            applicable.iter().any(|pattern| pattern_matches(pattern, prompt))
        })
    }

    /// Additive fallback scoring over every corpus entry.
    ///
    /// +10 provider-family alias hit, +5 model-family alias intersection,
    /// +3 capability keyword in content or tags, +2 recent capture.
    /// Zero-score entries are excluded; the sort is stable descending.
    fn score_fallbacks(
        &self,
        model_id: &str,
        provider: ModelProvider,
        capabilities: &[String],
    ) -> Vec<(&ReferencePrompt, u32)> {
        let aliases = provider_aliases(provider);
        let family_aliases: Vec<&str> = MODEL_FAMILIES
            .iter()
            .filter(|(fragment, _)| model_id.contains(fragment))
            .flat_map(|(_, aliases)| aliases.iter().copied())
            .collect();

        let mut scored: Vec<(&ReferencePrompt, u32)> = self
            .corpus
            .all()
            .iter()
            .map(|prompt| {
                let provider_lower = prompt.provider.to_lowercase();
                let id_lower = prompt.id.to_lowercase();
                let model_lower = prompt.model.to_lowercase();
                let content_lower = prompt.content.to_lowercase();

                let mut score = 0u32;

                if aliases
                    .iter()
                    .any(|a| provider_lower.contains(a) || id_lower.contains(a))
                {
                    score += 10;
                }

                if family_aliases
                    .iter()
                    .any(|a| id_lower.contains(a) || model_lower.contains(a))
                {
                    score += 5;
                }

                if capabilities.iter().any(|cap| {
                    content_lower.contains(cap.as_str())
                        || prompt.tags.iter().any(|t| t.as_str() == cap.as_str())
                }) {
                    score += 3;
                }

                if prompt.year().map(|y| y >= RECENT_YEAR).unwrap_or(false) {
                    score += 2;
                }

                (prompt, score)
            })
            .filter(|(_, score)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
    }
}

/// Confidence policy: 0.95 for exact matches; fallback confidence starts at
/// 0.6 and grows with candidate count and recency, capped at 0.9; 0.3 when
/// nothing matched at all.
fn compute_confidence(has_exact: bool, fallback_total: usize, top_is_recent: bool) -> f64 {
    if has_exact {
        return 0.95;
    }
    if fallback_total == 0 {
        return 0.3;
    }

    let mut confidence: f64 = 0.6;
    if fallback_total >= 3 {
        confidence += 0.2;
    }
    if fallback_total >= 5 {
        confidence += 0.1;
    }
    if top_is_recent {
        confidence += 0.1;
    }
    confidence.min(0.9)
}

fn pattern_matches(pattern: &ExactPattern, prompt: &ReferencePrompt) -> bool {
    let provider_lower = prompt.provider.to_lowercase();
    let id_lower = prompt.id.to_lowercase();
    let model_lower = prompt.model.to_lowercase();

    if !provider_lower.contains(pattern.provider) {
        return false;
    }
    if !id_lower.contains(pattern.model) && !model_lower.contains(pattern.model) {
        return false;
    }
    match pattern.version {
        Some(version) => id_lower.contains(version),
        None => true,
    }
}

fn build_reasoning(
    model_id: &str,
    exact_match: &Option<ReferencePrompt>,
    fallback_matches: &[ReferencePrompt],
    scored_total: usize,
) -> String {
    if let Some(exact) = exact_match {
        return format!(
            "Exact pattern match for {}: corpus entry '{}' corresponds to this model's \
             provider/model/version tokens.",
            model_id, exact.id
        );
    }
    if let Some(best) = fallback_matches.first() {
        return format!(
            "No exact corpus match for {}; {} scored fallback candidate(s), best '{}' \
             selected by provider-family, model-family, capability, and recency scoring.",
            model_id, scored_total, best.id
        );
    }
    format!(
        "No corpus entries matched {}; guidance will rely on general references only.",
        model_id
    )
}
