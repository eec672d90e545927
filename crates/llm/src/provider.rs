//! Structured Provider Trait
//!
//! Defines the common interface for all structured-output providers.
//! A structured provider takes a system prompt plus a user payload and
//! returns a single JSON value, the shape the instruction router's
//! decision delegate consumes.

use async_trait::async_trait;

use super::types::{LlmError, LlmResult, ProviderConfig};

/// Trait that all structured-output providers must implement.
///
/// Provides a unified interface for:
/// - Single-shot JSON-mode generation (generate_structured)
/// - Health checking
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Generate a structured JSON response.
    ///
    /// # Arguments
    /// * `system` - System prompt describing the decision policy and output shape
    /// * `user` - The request payload to decide on
    ///
    /// # Returns
    /// The parsed JSON value from the model's response
    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
    ) -> LlmResult<serde_json::Value>;

    /// Check if the provider is healthy and reachable.
    ///
    /// For API providers, this validates the API key against a cheap endpoint.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

/// Extract a JSON value from model output text.
///
/// JSON-mode endpoints still occasionally wrap the payload in markdown code
/// fences or prefix it with prose; this strips fences and falls back to the
/// outermost brace-delimited span before parsing.
pub fn extract_json(text: &str) -> LlmResult<serde_json::Value> {
    let trimmed = text.trim();

    // Direct parse first
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    // Strip ```json ... ``` fences
    let unfenced = if let Some(rest) = trimmed.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        let rest = rest.trim_start_matches(['\r', '\n']);
        rest.rsplit_once("```").map(|(body, _)| body).unwrap_or(rest)
    } else {
        trimmed
    };
    if let Ok(value) = serde_json::from_str(unfenced.trim()) {
        return Ok(value);
    }

    // Outermost object span
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    let preview: String = trimmed.chars().take(120).collect();
    Err(LlmError::ParseError {
        message: format!("Response is not valid JSON: {}", preview),
    })
}
