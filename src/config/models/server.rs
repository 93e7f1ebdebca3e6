//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads (defaults to actix's own choice)
    pub workers: Option<usize>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count cannot be 0".to_string());
        }

        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Enable CORS handling
    #[serde(default)]
    pub enabled: bool,
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether any origin is accepted
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.workers.is_none());
        assert!(!config.cors.enabled);
    }

    #[test]
    fn test_address_formatting() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_allows_all_when_unrestricted() {
        let cors = CorsConfig {
            enabled: true,
            allowed_origins: vec![],
        };
        assert!(cors.allows_all_origins());

        let restricted = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://example.com".to_string()],
        };
        assert!(!restricted.allows_all_origins());
    }
}
