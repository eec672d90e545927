//! Instruction Resolution
//!
//! Placeholder classification and system-instruction routing.
//!
//! - `placeholder` - Generic/placeholder instruction detection
//! - `prompts` - Default instruction set and decision-policy constants
//! - `router` - Two-stage instruction routing with an injected AI delegate

pub mod placeholder;
pub mod prompts;
pub mod router;

pub use placeholder::{PlaceholderClassifier, MIN_MEANINGFUL_LENGTH};
pub use prompts::{
    DECISION_POLICY_PROMPT, DEFAULT_SYSTEM_INSTRUCTION, MINIMAL_FALLBACK_INSTRUCTION,
};
pub use router::{
    AppliedSource, DecisionDelegate, InstructionRouter, ProviderDecisionDelegate, RouteInput,
    RouterDecision,
};
