//! Chat proxy endpoint
//!
//! The request path is fixed: validate the prompt, resolve the caller
//! identity, pass the admission check, and only then touch the AI backend.
//! A rejected request returns before any provider work happens.

use crate::core::rate_limiter::Admission;
use crate::server::routes::bearer_credential;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest accepted prompt, in characters
const MAX_PROMPT_CHARS: usize = 5000;

/// Configure chat routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat));
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The prompt to forward to the AI backend
    pub prompt: String,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated text
    pub response: String,
}

/// Chat proxy endpoint
async fn chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, GatewayError> {
    validate_prompt(&request.prompt)?;

    let identity = state.auth.resolve_identity(bearer_credential(&req));

    match state.ledger.check_and_record(&identity).await {
        Admission::Admitted {
            usage_count, limit, ..
        } => {
            debug!(
                "Admitted chat request for {}: {}/{} in window",
                identity, usage_count, limit
            );
        }
        Admission::Rejected {
            limit,
            retry_after_secs,
            ..
        } => {
            return Err(GatewayError::RateLimited {
                limit,
                retry_after_secs,
            });
        }
    }

    let response_text = state.provider.chat(&request.prompt).await?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        response: response_text,
    }))
}

fn validate_prompt(prompt: &str) -> Result<(), GatewayError> {
    if prompt.is_empty() {
        return Err(GatewayError::validation("Prompt cannot be empty"));
    }

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(GatewayError::validation(format!(
            "Prompt cannot exceed {} characters",
            MAX_PROMPT_CHARS
        )));
    }

    Ok(())
}
