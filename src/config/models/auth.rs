//! Authentication configuration

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err(
                "JWT expiration should not exceed 30 days for security reasons".to_string(),
            );
        }

        Ok(())
    }
}

fn default_jwt_expiration() -> u64 {
    1800
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
