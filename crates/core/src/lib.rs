//! Promptsmith Core
//!
//! Foundational error types, proxy configuration, and the model registry for
//! the Promptsmith workspace. This crate has zero dependencies on
//! application-level code (corpus, routing, LLM providers).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration data types shared across workspace crates
//! - `registry` - Model configuration registry (`ModelRegistry`, `ModelConfig`)
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Read-only registries** - the model table is constructed once and queried
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod proxy;
pub mod registry;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Configuration ────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};

// ── Model Registry ─────────────────────────────────────────────────────
pub use registry::{ModelConfig, ModelProvider, ModelRegistry};
