//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// Rate limiting configuration
///
/// Limits are requests per trailing window, keyed by caller identity.
/// Anonymous callers share one bucket and get the stricter limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per window for authenticated accounts
    #[serde(default = "default_authenticated_rpm")]
    pub authenticated_rpm: u32,
    /// Requests per window for the shared anonymous bucket
    #[serde(default = "default_anonymous_rpm")]
    pub anonymous_rpm: u32,
    /// Trailing window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            authenticated_rpm: default_authenticated_rpm(),
            anonymous_rpm: default_anonymous_rpm(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.authenticated_rpm == 0 {
            return Err("Authenticated request limit cannot be 0".to_string());
        }

        if self.anonymous_rpm == 0 {
            return Err("Anonymous request limit cannot be 0".to_string());
        }

        if self.window_secs == 0 {
            return Err("Rate limit window cannot be 0 seconds".to_string());
        }

        Ok(())
    }
}

fn default_authenticated_rpm() -> u32 {
    5
}

fn default_anonymous_rpm() -> u32 {
    3
}

fn default_window_secs() -> u64 {
    60
}
