//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, CorsConfig, ServerConfig};
use crate::core::providers::{ChatProvider, GeminiProvider};
use crate::core::rate_limiter::UsageLedger;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let auth = AuthSystem::new(config.auth());
        let ledger = UsageLedger::new(config.rate_limit().clone());
        let provider = GeminiProvider::from_config(config.provider().clone())?;

        info!("Registered provider: {}", provider.name());

        let state = AppState::new(config.clone(), auth, ledger, Arc::new(provider));

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let cors_config = self.config.cors.clone();
        let workers = self.config.workers;

        let mut server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(build_cors(&cors_config))
                .wrap(TracingLogger::default())
                .wrap(DefaultHeaders::new().add(("Server", "PromptGate")))
                .configure(routes::configure)
        })
        .bind(&bind_addr)
        .map_err(|e| GatewayError::Config(format!("Failed to bind {}: {}", bind_addr, e)))?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);

        server
            .run()
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }
}

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    if config.allows_all_origins() {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
