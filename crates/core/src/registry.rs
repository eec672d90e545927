//! Model Configuration Registry
//!
//! Read-only lookup from a model identifier to its hosted-provider family and
//! declared capability keywords. The matcher consumes this registry to reject
//! unknown model ids and to drive capability-based fallback scoring.
//!
//! The built-in table covers the hosted models the application ships with
//! (OpenAI, DeepSeek, Google AI). Tests and embedders can register additional
//! models via [`ModelRegistry::with_model`].

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Hosted LLM provider family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAI,
    DeepSeek,
    Google,
}

impl ModelProvider {
    /// Lowercase provider token, as used in alias tables and API routing.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAI => "openai",
            ModelProvider::DeepSeek => "deepseek",
            ModelProvider::Google => "google",
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a single hosted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Canonical model identifier (e.g. "gpt-4.1", "gemini-2.5-flash")
    pub id: String,
    /// Human-readable name for guidance text
    pub display_name: String,
    /// Provider family
    pub provider: ModelProvider,
    /// Declared capability keywords (fixed vocabulary shared with prompt tags:
    /// assistant, creative, coding, analysis, reasoning, safety)
    pub capabilities: Vec<String>,
}

impl ModelConfig {
    fn new(id: &str, display_name: &str, provider: ModelProvider, capabilities: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            provider,
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Registry of known model configurations.
///
/// Lookups resolve exact ids first, then fall back to the longest registered
/// id that prefixes the requested id: "gemini-2.5-flash-latest" resolves to
/// the "gemini-2.5-flash" entry. Unknown ids are a caller-input error.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelConfig>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModelRegistry {
    /// Registry with the built-in hosted model table.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelConfig::new(
                    "gpt-4.1",
                    "GPT-4.1",
                    ModelProvider::OpenAI,
                    &["assistant", "coding", "analysis"],
                ),
                ModelConfig::new(
                    "gpt-4o",
                    "GPT-4o",
                    ModelProvider::OpenAI,
                    &["assistant", "creative"],
                ),
                ModelConfig::new(
                    "gpt-4o-mini",
                    "GPT-4o mini",
                    ModelProvider::OpenAI,
                    &["assistant"],
                ),
                ModelConfig::new(
                    "o3-mini",
                    "o3-mini",
                    ModelProvider::OpenAI,
                    &["analysis", "reasoning"],
                ),
                ModelConfig::new(
                    "deepseek-chat",
                    "DeepSeek Chat",
                    ModelProvider::DeepSeek,
                    &["assistant", "coding"],
                ),
                ModelConfig::new(
                    "deepseek-reasoner",
                    "DeepSeek Reasoner",
                    ModelProvider::DeepSeek,
                    &["analysis", "reasoning"],
                ),
                ModelConfig::new(
                    "gemini-2.5-flash",
                    "Gemini 2.5 Flash",
                    ModelProvider::Google,
                    &["assistant", "analysis"],
                ),
                ModelConfig::new(
                    "gemini-2.5-pro",
                    "Gemini 2.5 Pro",
                    ModelProvider::Google,
                    &["analysis", "coding", "reasoning"],
                ),
            ],
        }
    }

    /// Empty registry (for tests that register their own models).
    pub fn empty() -> Self {
        Self { models: Vec::new() }
    }

    /// Builder-style registration of an additional model.
    pub fn with_model(mut self, config: ModelConfig) -> Self {
        self.models.push(config);
        self
    }

    /// All registered models.
    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    /// Resolve a model id: exact match first, then longest registered prefix.
    pub fn get(&self, model_id: &str) -> Option<&ModelConfig> {
        if let Some(exact) = self.models.iter().find(|m| m.id == model_id) {
            return Some(exact);
        }
        self.models
            .iter()
            .filter(|m| model_id.starts_with(m.id.as_str()))
            .max_by_key(|m| m.id.len())
    }

    /// Resolve a model id or fail with a NotFound error.
    pub fn require(&self, model_id: &str) -> CoreResult<&ModelConfig> {
        self.get(model_id)
            .ok_or_else(|| CoreError::not_found(format!("Unknown model: {}", model_id)))
    }
}
