//! Gemini Provider
//!
//! Implementation of the StructuredProvider trait for Google's Generative
//! Language API (`generateContent`), requesting `application/json` output.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{extract_json, missing_api_key_error, parse_http_error, StructuredProvider};
use super::types::{LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Generative Language API base (models collection)
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(config.proxy.as_ref());
        Self { config, client }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }

    fn generate_url(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url(),
            self.config.model,
            api_key
        )
    }

    fn build_request_body(&self, system: &str, user: &str) -> serde_json::Value {
        serde_json::json!({
            "systemInstruction": {
                "parts": [{ "text": system }]
            },
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": user }]
                }
            ],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens,
                "responseMimeType": "application/json"
            }
        })
    }
}

#[async_trait]
impl StructuredProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
    ) -> LlmResult<serde_json::Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| missing_api_key_error(self.name()))?;

        let body = self.build_request_body(system, user);

        let response = self
            .client
            .post(self.generate_url(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &text, self.name()));
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::ParseError {
                message: format!("Unexpected response shape: {}", e),
            })?;

        let content = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| LlmError::ParseError {
                message: "Response contained no candidate text".to_string(),
            })?;

        extract_json(&content)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| missing_api_key_error(self.name()))?;

        // Listing the models collection validates the key without generating
        let response = self
            .client
            .get(format!("{}?key={}", self.base_url(), api_key))
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &text, self.name()));
        }
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
