//! Instruction Router Integration Tests
//!
//! Exercises the full routing surface with a deterministic stub delegate:
//! policy disabled, heuristic short-circuits, delegate pass-through, and
//! delegate failure propagation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use promptsmith::{
    AppError, AppResult, AppliedSource, DecisionDelegate, InstructionRouter, RouteInput,
    RouterDecision, DEFAULT_SYSTEM_INSTRUCTION,
};

struct CountingDelegate {
    calls: AtomicUsize,
    outcome: Result<RouterDecision, String>,
}

impl CountingDelegate {
    fn passing_through(instruction: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(RouterDecision {
                should_use_default: false,
                final_instruction: instruction.to_string(),
                reasoning: "User instruction is specific and substantial.".to_string(),
                applied_source: AppliedSource::UserInstruction,
            }),
        })
    }

    fn conservative() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(RouterDecision {
                should_use_default: true,
                final_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
                reasoning: "Instruction reads as sample text, keeping the default.".to_string(),
                applied_source: AppliedSource::Default,
            }),
        })
    }

    fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            outcome: Err("delegate unavailable".to_string()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionDelegate for CountingDelegate {
    async fn decide(&self, _input: &RouteInput, _policy: &str) -> AppResult<RouterDecision> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(decision) => Ok(decision.clone()),
            Err(msg) => Err(AppError::internal(msg.clone())),
        }
    }
}

fn specific_instruction() -> String {
    "You are a tier-2 billing support specialist for Acme Cloud. Verify the \
     customer's plan before quoting refund amounts, never promise credits above \
     $50 without approval, and close every conversation with a summary of the \
     agreed next steps."
        .to_string()
}

fn input_with(instruction: Option<&str>) -> RouteInput {
    RouteInput {
        user_instruction: instruction.map(str::to_string),
        user_prompt: "A customer is disputing an invoice".to_string(),
        context: Some("billing".to_string()),
    }
}

#[tokio::test]
async fn test_policy_disabled_never_routes_to_default() {
    let delegate = CountingDelegate::passing_through("unused");
    let router = InstructionRouter::new(delegate.clone());

    for instruction in [None, Some("hi"), Some(specific_instruction().as_str())] {
        let decision = router.route(&input_with(instruction), false).await.unwrap();
        assert_eq!(decision.applied_source, AppliedSource::UserInstruction);
        assert!(!decision.final_instruction.is_empty());
    }
    assert_eq!(delegate.call_count(), 0);
}

#[tokio::test]
async fn test_short_instruction_heuristic_short_circuit() {
    let delegate = CountingDelegate::passing_through("unused");
    let router = InstructionRouter::new(delegate.clone());

    let decision = router.route(&input_with(Some("Help me")), true).await.unwrap();
    assert!(decision.should_use_default);
    assert_eq!(decision.applied_source, AppliedSource::Default);
    assert_eq!(decision.final_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    assert_eq!(delegate.call_count(), 0);
}

#[tokio::test]
async fn test_meaningful_instruction_reaches_delegate() {
    let instruction = specific_instruction();
    let delegate = CountingDelegate::passing_through(&instruction);
    let router = InstructionRouter::new(delegate.clone());

    let decision = router
        .route(&input_with(Some(&instruction)), true)
        .await
        .unwrap();
    assert_eq!(delegate.call_count(), 1);
    assert!(!decision.should_use_default);
    assert_eq!(decision.final_instruction, instruction);
}

#[tokio::test]
async fn test_delegate_decision_returned_unmodified() {
    // A conservative delegate keeps the default even for meaningful input
    let delegate = CountingDelegate::conservative();
    let router = InstructionRouter::new(delegate.clone());

    let decision = router
        .route(&input_with(Some(&specific_instruction())), true)
        .await
        .unwrap();
    assert_eq!(delegate.call_count(), 1);
    assert!(decision.should_use_default);
    assert_eq!(decision.final_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    assert!(decision.reasoning.contains("sample text"));
}

#[tokio::test]
async fn test_delegate_failure_surfaces_to_caller() {
    let delegate = CountingDelegate::unavailable();
    let router = InstructionRouter::new(delegate.clone());

    let result = router
        .route(&input_with(Some(&specific_instruction())), true)
        .await;
    assert!(result.is_err());
    assert_eq!(delegate.call_count(), 1);
}

#[tokio::test]
async fn test_final_instruction_never_empty() {
    let delegate = CountingDelegate::passing_through(&specific_instruction());
    let router = InstructionRouter::new(delegate);

    for (instruction, policy) in [
        (None, true),
        (None, false),
        (Some("short"), true),
        (Some("short"), false),
        (Some(""), true),
        (Some(""), false),
    ] {
        let decision = router.route(&input_with(instruction), policy).await.unwrap();
        assert!(
            !decision.final_instruction.trim().is_empty(),
            "empty instruction for input {:?} policy {}",
            instruction,
            policy
        );
    }
}
