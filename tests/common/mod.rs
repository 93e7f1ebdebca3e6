//! Shared fixtures for integration tests

use async_trait::async_trait;
use promptgate::auth::AuthSystem;
use promptgate::config::{
    AuthConfig, Config, GatewayConfig, ProviderConfig, RateLimitConfig, ServerConfig,
};
use promptgate::core::providers::{ChatProvider, ProviderError};
use promptgate::core::rate_limiter::UsageLedger;
use promptgate::server::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Canned AI backend that records how often it was called
#[derive(Debug, Default)]
pub struct StubProvider {
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn chat(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("echo: {}", prompt))
    }
}

pub fn test_config() -> Config {
    Config {
        gateway: GatewayConfig {
            server: ServerConfig::default(),
            auth: AuthConfig {
                jwt_secret: TEST_JWT_SECRET.to_string(),
                jwt_expiration: 3600,
            },
            rate_limit: RateLimitConfig {
                authenticated_rpm: 5,
                anonymous_rpm: 3,
                window_secs: 60,
            },
            provider: ProviderConfig {
                api_key: "test-key".to_string(),
                ..Default::default()
            },
        },
    }
}

/// Build a fresh application state around a stub provider
///
/// Each call returns an isolated ledger and user table, so tests cannot
/// leak rate-limit state into one another.
pub fn test_state(provider: Arc<StubProvider>) -> AppState {
    let config = test_config();
    let auth = AuthSystem::new(config.auth());
    let ledger = UsageLedger::new(config.rate_limit().clone());
    AppState::new(config, auth, ledger, provider)
}
