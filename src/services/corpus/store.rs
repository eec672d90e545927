//! Prompt Corpus Store
//!
//! Immutable collection of reference prompts, loaded once from a source
//! directory and shared read-only for the process lifetime. An explicit
//! service object (constructed at startup, passed by `Arc`) rather than a
//! module-level singleton, so tests can build fixture corpora directly.

use std::collections::HashSet;
use std::path::Path;

use rand::seq::SliceRandom;

use crate::services::corpus::discovery::discover_reference_files;
use crate::services::corpus::model::{
    CorpusStats, ProviderCategory, PromptTag, ReferencePrompt,
};
use crate::services::corpus::parser::{normalize_id, parse_reference_file};
use crate::utils::error::AppResult;

/// Immutable collection of reference prompts
#[derive(Debug, Clone)]
pub struct PromptCorpus {
    prompts: Vec<ReferencePrompt>,
}

impl PromptCorpus {
    /// Load the corpus from a directory of source documents.
    ///
    /// Malformed or empty-body documents are logged and skipped; the load
    /// fails only when the directory itself cannot be read.
    pub fn load_from_dir(dir: &Path) -> AppResult<Self> {
        let discovered = discover_reference_files(dir)?;
        let mut prompts = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for reference in discovered {
            let parsed = match parse_reference_file(&reference.path, &reference.content) {
                Ok(Some(p)) => p,
                Ok(None) => {
                    tracing::debug!(
                        "Dropping empty-body reference {}",
                        reference.path.display()
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse reference file {}: {}",
                        reference.path.display(),
                        e
                    );
                    continue;
                }
            };

            let id = normalize_id(&parsed.name);
            if !seen_ids.insert(id.clone()) {
                tracing::warn!("Duplicate reference id '{}', keeping first occurrence", id);
                continue;
            }

            prompts.push(ReferencePrompt {
                id,
                name: parsed.name,
                provider: parsed.provider,
                model: parsed.model,
                date: parsed.date,
                content: parsed.content,
                category: parsed.category,
                tags: parsed.tags,
            });
        }

        tracing::info!("Loaded {} reference prompts", prompts.len());
        Ok(Self { prompts })
    }

    /// Build a corpus from already-constructed prompts (fixtures, tests).
    /// Duplicate ids keep the first occurrence.
    pub fn from_prompts(prompts: Vec<ReferencePrompt>) -> Self {
        let mut seen_ids: HashSet<String> = HashSet::new();
        let prompts = prompts
            .into_iter()
            .filter(|p| seen_ids.insert(p.id.clone()))
            .collect();
        Self { prompts }
    }

    /// All prompts, in corpus order.
    pub fn all(&self) -> &[ReferencePrompt] {
        &self.prompts
    }

    /// Number of prompts in the corpus.
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Check if the corpus contains no prompts.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Find a prompt by id.
    pub fn get_by_id(&self, id: &str) -> Option<&ReferencePrompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// All prompts in the given category.
    pub fn get_by_category(&self, category: ProviderCategory) -> Vec<&ReferencePrompt> {
        self.prompts
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// All prompts whose raw provider token matches (case-insensitive).
    pub fn get_by_provider(&self, provider: &str) -> Vec<&ReferencePrompt> {
        self.prompts
            .iter()
            .filter(|p| p.provider.eq_ignore_ascii_case(provider))
            .collect()
    }

    /// Case-insensitive substring search over name, model, and content.
    pub fn search(&self, query: &str) -> Vec<&ReferencePrompt> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.prompts
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.model.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// A random sample of up to `n` prompts (inspiration picks, independent
    /// of relevance ranking).
    pub fn get_random(&self, n: usize) -> Vec<&ReferencePrompt> {
        let mut rng = rand::thread_rng();
        self.prompts.choose_multiple(&mut rng, n).collect()
    }

    /// Prompts similar to the given one: same category OR any tag overlap,
    /// excluding the prompt itself, truncated to `n`.
    pub fn get_similar(&self, prompt: &ReferencePrompt, n: usize) -> Vec<&ReferencePrompt> {
        self.prompts
            .iter()
            .filter(|p| p.id != prompt.id)
            .filter(|p| {
                p.category == prompt.category
                    || p.tags.iter().any(|t| prompt.tags.contains(t))
            })
            .take(n)
            .collect()
    }

    /// Aggregate statistics over the corpus.
    pub fn stats(&self) -> CorpusStats {
        let mut stats = CorpusStats {
            total: self.prompts.len(),
            openai_count: 0,
            anthropic_count: 0,
            google_count: 0,
            xai_count: 0,
            meta_count: 0,
            other_count: 0,
            tagged_count: 0,
        };

        for prompt in &self.prompts {
            match prompt.category {
                ProviderCategory::OpenAI => stats.openai_count += 1,
                ProviderCategory::Anthropic => stats.anthropic_count += 1,
                ProviderCategory::Google => stats.google_count += 1,
                ProviderCategory::XAI => stats.xai_count += 1,
                ProviderCategory::Meta => stats.meta_count += 1,
                ProviderCategory::Other => stats.other_count += 1,
            }
            if !prompt.tags.is_empty() {
                stats.tagged_count += 1;
            }
        }

        stats
    }
}

/// Convenience helper used by fixtures and tests across the crate.
pub fn make_reference_prompt(
    id: &str,
    provider: &str,
    model: &str,
    date: &str,
    content: &str,
    category: ProviderCategory,
    tags: Vec<PromptTag>,
) -> ReferencePrompt {
    ReferencePrompt {
        id: id.to_string(),
        name: id.to_string(),
        provider: provider.to_string(),
        model: model.to_string(),
        date: date.to_string(),
        content: content.to_string(),
        category,
        tags,
    }
}
