//! # PromptGate
//!
//! A small AI chat gateway: proxies prompts to Google Gemini behind JWT
//! authentication and per-caller sliding-window rate limiting.
//!
//! Every request to the chat surface goes through the same pipeline: the
//! identity resolver maps the optional bearer credential to a caller
//! identity (a verified account or the shared anonymous sentinel), the
//! usage ledger decides admission against a trailing 60-second window
//! (5 requests for accounts, 3 for the anonymous bucket), and only admitted
//! requests reach the AI backend.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use promptgate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use auth::{AuthSystem, CallerIdentity, UNAUTHENTICATED_USER_ID};
pub use config::Config;
pub use core::providers::{ChatProvider, ProviderError};
pub use core::rate_limiter::{Admission, UsageLedger, UsageSnapshot};
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// A minimal gateway facade
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting PromptGate");

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
