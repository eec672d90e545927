//! Promptsmith LLM
//!
//! Provides a unified structured-output interface for the hosted providers
//! the application calls:
//! - OpenAI (GPT-4.1, GPT-4o, o3)
//! - DeepSeek
//! - Google Gemini
//!
//! Providers return a single JSON value per call; the instruction router's
//! decision delegate is built on top of this interface. Also includes the
//! HTTP client factory shared by all providers.

pub mod deepseek;
pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::{extract_json, missing_api_key_error, parse_http_error, StructuredProvider};
pub use types::*;
