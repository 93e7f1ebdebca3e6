//! Google Gemini provider
//!
//! Talks to the Google AI Studio REST API. The API key travels as a query
//! parameter; an optional system prompt, loaded from a file at startup, is
//! attached to every request as a `systemInstruction`.

use super::{ChatProvider, ProviderError};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    config: ProviderConfig,
    http_client: Client,
    system_prompt: Option<String>,
}

impl GeminiProvider {
    /// Create a provider from configuration
    pub fn from_config(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ProviderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let system_prompt = config
            .system_prompt_path
            .as_deref()
            .and_then(load_system_prompt);

        Ok(Self {
            config,
            http_client,
            system_prompt,
        })
    }

    /// Endpoint URL for a generate call
    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent?key={}",
            self.config.api_base, self.config.api_version, self.config.model, self.config.api_key
        )
    }

    /// Build the request body for a single-turn prompt
    fn build_request(&self, prompt: &str) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });

        if let Some(system_prompt) = &self.system_prompt {
            body["systemInstruction"] = json!({
                "parts": [{"text": system_prompt}]
            });
        }

        body
    }

    /// Pull the generated text out of a response payload
    fn extract_text(response: &Value) -> Result<String, ProviderError> {
        let parts = response
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or(ProviderError::EmptyResponse)?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn chat(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = self.build_request(prompt);

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: Value = response.json().await?;
        Self::extract_text(&payload)
    }
}

/// Read the system prompt file, if there is one
///
/// A missing file is tolerated: the gateway runs without a system prompt,
/// matching how it behaves when no path is configured at all.
fn load_system_prompt(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("System prompt file {} not loaded: {}", path, e);
            None
        }
    }
}
