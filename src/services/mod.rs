//! Engine Services
//!
//! The instruction & guidance resolution subsystem:
//!
//! - `config` - Engine configuration
//! - `corpus` - Reference prompt corpus (load, parse, query)
//! - `instruction` - Placeholder classification and instruction routing
//! - `relevance` - Relevance scoring over the corpus
//! - `matcher` - Model-to-prompt matching with confidence
//! - `guidance` - Guidance composition for prompt templates

pub mod config;
pub mod corpus;
pub mod guidance;
pub mod instruction;
pub mod matcher;
pub mod relevance;
