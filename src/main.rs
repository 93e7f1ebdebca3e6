//! PromptGate - AI chat gateway
//!
//! Proxies chat prompts to Gemini behind authentication and rate limiting.

use promptgate::{Config, Gateway};
use std::path::Path;
use std::process::ExitCode;
use tracing::Level;

const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> promptgate::Result<()> {
    let config = match std::env::var("PROMPTGATE_CONFIG") {
        Ok(path) => Config::from_file(path).await?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Config::from_file(DEFAULT_CONFIG_PATH).await?
        }
        Err(_) => Config::from_env()?,
    };

    let gateway = Gateway::new(config)?;
    gateway.run().await
}
