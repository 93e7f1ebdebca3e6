//! JWT token handling
//!
//! This module provides JWT access token creation and verification.

use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use uuid::Uuid;

const ISSUER: &str = "promptgate";
const AUDIENCE: &str = "api";

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token expiration time in seconds
    expiration: u64,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// JWT ID
    pub jti: String,
}

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
        }
    }

    /// Create an access token for an account
    pub fn create_access_token(&self, account_id: &str) -> Result<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + self.expiration,
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;

        debug!("Created access token for account: {}", account_id);
        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("JWT verification failed: {}", e);
            GatewayError::Jwt(e)
        })?;

        Ok(token_data.claims)
    }

    /// Extract a bearer token from an Authorization header value
    pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
        header_value.strip_prefix("Bearer ")
    }

    /// Get token expiration time in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| GatewayError::internal(format!("System time error: {}", e)))?
        .as_secs())
}
