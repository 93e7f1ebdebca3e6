//! Configuration management for the gateway
//!
//! This module handles loading and validation of all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        gateway.apply_env_overrides();
        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = GatewayConfig::default();
        gateway.apply_env_overrides();

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    /// Get rate limit configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.gateway.rate_limit
    }

    /// Get provider configuration
    pub fn provider(&self) -> &ProviderConfig {
        &self.gateway.provider
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .auth
            .validate()
            .map_err(|e| GatewayError::Config(format!("Auth config error: {}", e)))?;

        self.gateway
            .rate_limit
            .validate()
            .map_err(|e| GatewayError::Config(format!("Rate limit config error: {}", e)))?;

        self.gateway
            .provider
            .validate()
            .map_err(|e| GatewayError::Config(format!("Provider config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
server:
  host: "127.0.0.1"
  port: 8080

auth:
  jwt_secret: "test-secret-that-is-at-least-32-characters-long"
  jwt_expiration: 3600

rate_limit:
  authenticated_rpm: 5
  anonymous_rpm: 3
  window_secs: 60

provider:
  api_key: "test-key"
  model: "gemini-1.5-flash"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.rate_limit().authenticated_rpm, 5);
        assert_eq!(config.provider().model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_config_from_file_applies_rate_limit_defaults() {
        let config_content = r#"
auth:
  jwt_secret: "test-secret-that-is-at-least-32-characters-long"

provider:
  api_key: "test-key"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.rate_limit().authenticated_rpm, 5);
        assert_eq!(config.rate_limit().anonymous_rpm, 3);
        assert_eq!(config.rate_limit().window_secs, 60);
    }

    #[test]
    fn test_default_config_requires_provider_key() {
        // Without an API key the gateway must refuse to start.
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[tokio::test]
    async fn test_config_rejects_malformed_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"server: [not, a, map").unwrap();

        assert!(Config::from_file(temp_file.path()).await.is_err());
    }
}
