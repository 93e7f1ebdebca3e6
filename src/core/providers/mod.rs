//! AI provider interface
//!
//! The gateway talks to its generative-AI backend through one capability:
//! `chat(prompt) -> text`. Providers own their transport, timeouts and
//! error mapping.

pub mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Errors originating in a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failures (connect, timeout, TLS)
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned status {status}: {message}")]
    Api {
        /// HTTP status code from the provider
        status: u16,
        /// Provider-supplied error text
        message: String,
    },

    /// The provider answered 2xx but the payload carried no usable text
    #[error("provider returned no content")]
    EmptyResponse,

    /// The provider could not be constructed from its configuration
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

/// Unified chat interface for AI backends
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name, used for routing and logging
    fn name(&self) -> &'static str;

    /// Send a prompt and return the generated text
    async fn chat(&self, prompt: &str) -> Result<String, ProviderError>;
}
