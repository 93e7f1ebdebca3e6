//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// AI provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl GatewayConfig {
    /// Apply environment variable overrides
    ///
    /// `GEMINI_API_KEY` and `PROMPTGATE_JWT_SECRET` take precedence over any
    /// file-provided values so secrets can stay out of config files.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.provider.api_key = key;
            }
        }

        if let Ok(secret) = std::env::var("PROMPTGATE_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }

        if let Ok(host) = std::env::var("PROMPTGATE_HOST") {
            if !host.is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(port) = std::env::var("PROMPTGATE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }
}
