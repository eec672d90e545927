//! Promptsmith
//!
//! Instruction routing and reference-prompt guidance engine for
//! prompt-engineering workflows. Given a user request, the engine decides
//! which system instruction should govern model behavior (user override vs.
//! the curated default set) and which captured provider system prompts are
//! the most relevant references for the target model and task.
//!
//! ## Subsystems
//!
//! - [`services::corpus`] - reference prompt corpus: loaded once from a
//!   directory of `<provider>-<model>_<date>` documents, then shared
//!   read-only
//! - [`services::instruction`] - placeholder classification plus the
//!   two-stage instruction router with its AI decision delegate
//! - [`services::relevance`] - deterministic token/tag relevance ranking
//! - [`services::matcher`] - exact and scored fallback model matching with
//!   confidence
//! - [`services::guidance`] - guidance composition for downstream prompt
//!   templates
//!
//! The UI, chat transport, and persistence layers are external collaborators;
//! this crate exposes only the decision logic.

pub mod services;
pub mod utils;

// ── Errors ─────────────────────────────────────────────────────────────
pub use utils::error::{AppError, AppResult};

// ── Configuration ──────────────────────────────────────────────────────
pub use services::config::EngineConfig;

// ── Corpus ─────────────────────────────────────────────────────────────
pub use services::corpus::{
    CorpusStats, PromptCorpus, PromptTag, ProviderCategory, ReferencePrompt,
};

// ── Instruction Routing ────────────────────────────────────────────────
pub use services::instruction::{
    AppliedSource, DecisionDelegate, InstructionRouter, PlaceholderClassifier,
    ProviderDecisionDelegate, RouteInput, RouterDecision, DEFAULT_SYSTEM_INSTRUCTION,
};

// ── Relevance & Matching ───────────────────────────────────────────────
pub use services::matcher::{ModelMatch, ModelMatcher};
pub use services::relevance::{rank_prompts, score_prompt};

// ── Guidance ───────────────────────────────────────────────────────────
pub use services::guidance::{
    GuidanceComposer, GuidanceContext, ModelEnrichment, StructureRecommendation, TaskKind,
};

// ── Re-exports from workspace crates ───────────────────────────────────
pub use promptsmith_core::{ModelConfig, ModelProvider, ModelRegistry};
