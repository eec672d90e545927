//! Guidance Composer
//!
//! Assembles ranked reference prompts, an inspiration sample, structural
//! recommendations, and quality indicators into guidance consumed by
//! downstream prompt templates. Model-specific enrichment is best-effort:
//! a matcher failure is logged and omitted, never fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::services::corpus::model::{ProviderCategory, ReferencePrompt};
use crate::services::corpus::store::PromptCorpus;
use crate::services::matcher::{ModelMatch, ModelMatcher};
use crate::services::relevance::rank_prompts;
use promptsmith_core::ModelRegistry;

/// How many ranked prompts feed the guidance
const DEFAULT_TOP_RELEVANT: usize = 5;

/// How many random prompts are sampled for inspiration
const DEFAULT_INSPIRATION_SAMPLE: usize = 3;

/// Reference content longer than this counts as detailed
const DETAILED_CONTENT_LENGTH: usize = 1000;

/// The prompt-engineering workflow a composition serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Generate,
    Improve,
    Compare,
    Test,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Generate => write!(f, "generate"),
            TaskKind::Improve => write!(f, "improve"),
            TaskKind::Compare => write!(f, "compare"),
            TaskKind::Test => write!(f, "test"),
        }
    }
}

/// Structural pattern observed across the ranked reference prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureRecommendation {
    RoleDefinition,
    Constraints,
    MarkdownSections,
    Examples,
}

impl StructureRecommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureRecommendation::RoleDefinition => "role_definition",
            StructureRecommendation::Constraints => "constraints",
            StructureRecommendation::MarkdownSections => "markdown_sections",
            StructureRecommendation::Examples => "examples",
        }
    }

    fn exhibited_by(&self, prompt: &ReferencePrompt) -> bool {
        let content_lower = prompt.content.to_lowercase();
        match self {
            StructureRecommendation::RoleDefinition => content_lower.contains("you are"),
            StructureRecommendation::Constraints => {
                content_lower.contains("do not")
                    || content_lower.contains("must not")
                    || content_lower.contains("never")
            }
            StructureRecommendation::MarkdownSections => prompt
                .content
                .lines()
                .any(|line| line.trim_start().starts_with('#')),
            StructureRecommendation::Examples => {
                content_lower.contains("example") || content_lower.contains("e.g.")
            }
        }
    }
}

const ALL_RECOMMENDATIONS: &[StructureRecommendation] = &[
    StructureRecommendation::RoleDefinition,
    StructureRecommendation::Constraints,
    StructureRecommendation::MarkdownSections,
    StructureRecommendation::Examples,
];

/// Model-specific enrichment, present only when the matcher succeeded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEnrichment {
    pub guidance: String,
    pub exact_match: Option<ReferencePrompt>,
    pub confidence: f64,
}

/// Request-scoped projection of the corpus for one composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceContext {
    /// Ranked relevant prompts, best first
    pub relevant_prompts: Vec<ReferencePrompt>,
    /// Random sample, independent of relevance
    pub inspiration_prompts: Vec<ReferencePrompt>,
    /// Narrative referencing the dominant provider among the relevant set
    pub guidance_text: String,
    pub structure_recommendations: Vec<StructureRecommendation>,
    pub quality_indicators: Vec<String>,
    /// Best-effort model enrichment; None when no model was given or the
    /// matcher failed
    pub model_enrichment: Option<ModelEnrichment>,
}

/// Composes guidance contexts from the corpus snapshot.
pub struct GuidanceComposer {
    corpus: Arc<PromptCorpus>,
    matcher: ModelMatcher,
    top_relevant: usize,
    inspiration_sample: usize,
}

impl GuidanceComposer {
    pub fn new(corpus: Arc<PromptCorpus>, registry: Arc<ModelRegistry>) -> Self {
        let matcher = ModelMatcher::new(corpus.clone(), registry);
        Self {
            corpus,
            matcher,
            top_relevant: DEFAULT_TOP_RELEVANT,
            inspiration_sample: DEFAULT_INSPIRATION_SAMPLE,
        }
    }

    /// Override the ranked/inspiration set sizes (from configuration).
    pub fn with_limits(mut self, top_relevant: usize, inspiration_sample: usize) -> Self {
        self.top_relevant = top_relevant;
        self.inspiration_sample = inspiration_sample;
        self
    }

    /// Compose guidance for a user prompt.
    ///
    /// The relevance-based parts always succeed; model enrichment is
    /// attempted only when `model_id` is given and degrades to `None` on
    /// failure.
    pub fn compose(
        &self,
        user_prompt: &str,
        task_kind: TaskKind,
        model_id: Option<&str>,
    ) -> GuidanceContext {
        let relevant_prompts = rank_prompts(self.corpus.all(), user_prompt, self.top_relevant);
        let inspiration_prompts: Vec<ReferencePrompt> = self
            .corpus
            .get_random(self.inspiration_sample)
            .into_iter()
            .cloned()
            .collect();

        let structure_recommendations = recommend_structures(&relevant_prompts);
        let quality_indicators = derive_quality_indicators(&relevant_prompts);
        let guidance_text = build_guidance_text(&relevant_prompts, task_kind);

        let model_enrichment = model_id.and_then(|id| match self.matcher.match_model(id) {
            Ok(model_match) => Some(ModelEnrichment {
                guidance: build_model_guidance(&model_match),
                exact_match: model_match.exact_match.clone(),
                confidence: model_match.confidence,
            }),
            Err(e) => {
                tracing::warn!("Model-specific guidance unavailable for {}: {}", id, e);
                None
            }
        });

        GuidanceContext {
            relevant_prompts,
            inspiration_prompts,
            guidance_text,
            structure_recommendations,
            quality_indicators,
            model_enrichment,
        }
    }
}

/// Structural patterns exhibited by enough of the ranked prompts.
///
/// The threshold is 2 prompts, clamped down to 1 when fewer than 2 were
/// ranked so a single strong reference still yields recommendations.
fn recommend_structures(ranked: &[ReferencePrompt]) -> Vec<StructureRecommendation> {
    if ranked.is_empty() {
        return Vec::new();
    }
    let threshold = if ranked.len() < 2 { 1 } else { 2 };

    ALL_RECOMMENDATIONS
        .iter()
        .filter(|rec| {
            ranked.iter().filter(|p| rec.exhibited_by(p)).count() >= threshold
        })
        .copied()
        .collect()
}

/// Quality indicator strings derived from the ranked prompts.
fn derive_quality_indicators(ranked: &[ReferencePrompt]) -> Vec<String> {
    let mut indicators = Vec::new();

    if ranked
        .iter()
        .any(|p| p.content.chars().count() > DETAILED_CONTENT_LENGTH)
    {
        indicators.push("detailed/specific".to_string());
    }

    let any_content = |keywords: &[&str]| {
        ranked.iter().any(|p| {
            let lower = p.content.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
    };

    if any_content(&["clear", "clarity"]) {
        indicators.push("clarity".to_string());
    }
    if any_content(&["consistent", "consistency"]) {
        indicators.push("consistency".to_string());
    }

    indicators
}

/// Narrative text naming the dominant category among the relevant set.
fn build_guidance_text(ranked: &[ReferencePrompt], task_kind: TaskKind) -> String {
    if ranked.is_empty() {
        return format!(
            "No closely matching reference prompts were found; relying on general \
             prompt-engineering practice for this {} task.",
            task_kind
        );
    }

    let dominant = dominant_category(ranked);
    format!(
        "Drawing on {} reference prompt(s), dominated by {} captures, for this {} task. \
         The strongest prompts in this set define a clear role, state explicit \
         constraints, and include examples where they help.",
        ranked.len(),
        dominant,
        task_kind
    )
}

/// Most frequent category; earliest-ranked wins ties.
fn dominant_category(ranked: &[ReferencePrompt]) -> ProviderCategory {
    let mut counts: Vec<(ProviderCategory, usize)> = Vec::new();
    for prompt in ranked {
        match counts.iter_mut().find(|(c, _)| *c == prompt.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((prompt.category, 1)),
        }
    }
    // Strictly-greater comparison keeps the earliest-ranked category on ties
    let mut best: Option<(ProviderCategory, usize)> = None;
    for (category, count) in counts {
        if best.map(|(_, n)| count > n).unwrap_or(true) {
            best = Some((category, count));
        }
    }
    best.map(|(c, _)| c).unwrap_or(ProviderCategory::Other)
}

fn build_model_guidance(model_match: &ModelMatch) -> String {
    if let Some(exact) = &model_match.exact_match {
        return format!(
            "A captured system prompt exists for {} ('{}'); mirror its structure and tone.",
            model_match.model_name, exact.id
        );
    }
    if model_match.fallback_matches.is_empty() {
        return format!(
            "No captured references for {}; lean on the general recommendations above.",
            model_match.model_name
        );
    }
    let ids: Vec<&str> = model_match
        .fallback_matches
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    format!(
        "No exact capture for {}; the nearest references are: {}.",
        model_match.model_name,
        ids.join(", ")
    )
}
