//! Authentication endpoints

use crate::auth::{NewUser, User};
use crate::server::routes::{ApiResponse, bearer_credential};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(get_current_user)),
    );
}

/// User registration request
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    username: String,
    password: String,
    email: Option<String>,
    full_name: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// User response (without sensitive data)
#[derive(Debug, Serialize)]
struct UserResponse {
    username: String,
    email: Option<String>,
    full_name: Option<String>,
    disabled: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Login response
#[derive(Debug, Serialize)]
struct LoginResponse {
    access_token: String,
    token_type: String,
    expires_in: u64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            disabled: user.disabled,
            created_at: user.created_at,
        }
    }
}

/// User registration endpoint
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();

    let user = state.auth.register(NewUser {
        username: request.username,
        password: request.password,
        email: request.email,
        full_name: request.full_name,
    })?;

    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(user))))
}

/// User login endpoint
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, GatewayError> {
    let (_user, access_token) = state.auth.login(&request.username, &request.password)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.auth.jwt().expiration(),
    }))
}

/// Current user endpoint
///
/// The one surface that mandates login: anonymous callers get 401 here,
/// even though the identity resolver itself never errors.
async fn get_current_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, GatewayError> {
    let identity = state.auth.resolve_identity(bearer_credential(&req));
    let user = state.auth.current_user(&identity)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}
