//! AI provider configuration

use super::default_timeout;
use serde::{Deserialize, Serialize};

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (Google AI Studio); also read from `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Optional path to a system prompt file prepended to every conversation
    pub system_prompt_path: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_base: default_api_base(),
            api_version: default_api_version(),
            request_timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            system_prompt_path: None,
        }
    }
}

impl ProviderConfig {
    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err(
                "Provider API key is not set. Set GEMINI_API_KEY or provider.api_key".to_string(),
            );
        }

        if self.model.is_empty() {
            return Err("Provider model cannot be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Provider request timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.api_base, "https://generativelanguage.googleapis.com");
        assert_eq!(config.api_version, "v1beta");
        assert!(config.system_prompt_path.is_none());
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = ProviderConfig::default();
        assert!(config.validate().is_err());

        let config = ProviderConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
