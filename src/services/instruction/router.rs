//! System Instruction Router
//!
//! Two-stage decision over which system instruction governs a request:
//!
//! Stage 1 (heuristic): a user instruction is considered meaningful only if
//! it is present, longer than the minimum length, and not placeholder text.
//! Anything else short-circuits to the default instruction set.
//!
//! Stage 2 (AI-assisted): meaningful instructions still need a judgment call
//! on conscious override intent. That decision is delegated to an injected
//! capability and returned unmodified. Delegate failures propagate to the
//! caller; there is no silent fallback on this branch.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::services::instruction::placeholder::{PlaceholderClassifier, MIN_MEANINGFUL_LENGTH};
use crate::services::instruction::prompts::{
    DECISION_POLICY_PROMPT, DEFAULT_SYSTEM_INSTRUCTION, MINIMAL_FALLBACK_INSTRUCTION,
};
use crate::utils::error::{AppError, AppResult};
use promptsmith_llm::StructuredProvider;

/// Which instruction source a routing decision applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedSource {
    UserInstruction,
    Default,
}

/// Result of routing a request's system instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterDecision {
    pub should_use_default: bool,
    pub final_instruction: String,
    pub reasoning: String,
    pub applied_source: AppliedSource,
}

/// Input to a routing decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_instruction: Option<String>,
    pub user_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Capability making the final override-intent judgment for instructions the
/// heuristic found meaningful. Injected so tests can substitute a
/// deterministic stub.
#[async_trait]
pub trait DecisionDelegate: Send + Sync {
    async fn decide(&self, input: &RouteInput, policy_prompt: &str) -> AppResult<RouterDecision>;
}

/// Delegate backed by a structured-output LLM provider.
pub struct ProviderDecisionDelegate {
    provider: Arc<dyn StructuredProvider>,
}

impl ProviderDecisionDelegate {
    pub fn new(provider: Arc<dyn StructuredProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl DecisionDelegate for ProviderDecisionDelegate {
    async fn decide(&self, input: &RouteInput, policy_prompt: &str) -> AppResult<RouterDecision> {
        let payload = serde_json::to_string_pretty(input)?;
        let value = self
            .provider
            .generate_structured(policy_prompt, &payload)
            .await?;

        let decision: RouterDecision = serde_json::from_value(value)?;
        if decision.final_instruction.trim().is_empty() {
            return Err(AppError::validation(
                "Decision delegate returned an empty finalInstruction",
            ));
        }
        Ok(decision)
    }
}

/// Routes requests to the governing system instruction.
pub struct InstructionRouter {
    classifier: PlaceholderClassifier,
    delegate: Arc<dyn DecisionDelegate>,
}

impl InstructionRouter {
    /// Create a router with the given decision delegate.
    pub fn new(delegate: Arc<dyn DecisionDelegate>) -> Self {
        Self {
            classifier: PlaceholderClassifier::new(),
            delegate,
        }
    }

    /// Decide which instruction governs this request.
    ///
    /// With `use_default_policy` disabled the user instruction always wins
    /// (verbatim, or the minimal fallback when absent). Otherwise the
    /// two-stage decision applies. `final_instruction` is never empty.
    pub async fn route(
        &self,
        input: &RouteInput,
        use_default_policy: bool,
    ) -> AppResult<RouterDecision> {
        if !use_default_policy {
            let user_text = input
                .user_instruction
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty());
            return Ok(RouterDecision {
                should_use_default: false,
                final_instruction: user_text
                    .unwrap_or(MINIMAL_FALLBACK_INSTRUCTION)
                    .to_string(),
                reasoning: "Default-instruction policy disabled explicitly; applying the user \
                            instruction as provided."
                    .to_string(),
                applied_source: AppliedSource::UserInstruction,
            });
        }

        if !self.has_meaningful_instruction(input) {
            return Ok(RouterDecision {
                should_use_default: true,
                final_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
                reasoning: "No meaningful custom instruction provided; applying the default \
                            instruction set."
                    .to_string(),
                applied_source: AppliedSource::Default,
            });
        }

        // Meaningfulness alone is not proof of conscious override intent;
        // the delegate makes the final call and its decision is returned
        // unmodified. Failures surface to the caller.
        self.delegate.decide(input, DECISION_POLICY_PROMPT).await
    }

    fn has_meaningful_instruction(&self, input: &RouteInput) -> bool {
        match input.user_instruction.as_deref() {
            Some(text) => {
                let trimmed = text.trim();
                trimmed.chars().count() > MIN_MEANINGFUL_LENGTH
                    && !self.classifier.is_placeholder(trimmed)
            }
            None => false,
        }
    }
}
