//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod auth;
pub mod chat;
pub mod health;
pub mod profile;

use crate::auth::jwt::JwtHandler;
use actix_web::{HttpRequest, http::header, web};

/// Register every route on the application
///
/// Shared by the real server and the integration tests, so both always
/// serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    auth::configure_routes(cfg);
    chat::configure_routes(cfg);
    profile::configure_routes(cfg);
}

/// Extract the bearer credential from a request, if any
///
/// Absence and malformed header values both yield `None`; deciding what
/// that means is the identity resolver's job, not the HTTP layer's.
pub fn bearer_credential(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(JwtHandler::extract_token_from_header)
}

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
