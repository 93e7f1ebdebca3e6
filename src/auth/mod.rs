//! Authentication system
//!
//! Account registration and login, JWT issuance, and the identity resolution
//! step every request goes through before rate limiting.

pub mod identity;
pub mod jwt;
pub mod users;

pub use identity::{CallerIdentity, UNAUTHENTICATED_USER_ID};
pub use users::{NewUser, User, UserStore};

use crate::config::AuthConfig;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// In-memory account table
    users: Arc<UserStore>,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            users: Arc::new(UserStore::new()),
            jwt: Arc::new(jwt::JwtHandler::new(config)),
        }
    }

    /// Register a new account
    pub fn register(&self, new_user: NewUser) -> Result<User> {
        info!("User registration attempt: {}", new_user.username);
        let user = self.users.create_user(new_user)?;
        info!("User registered successfully: {}", user.username);
        Ok(user)
    }

    /// Verify credentials and mint an access token
    pub fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        info!("User login attempt: {}", username);

        let user = self.users.authenticate(username, password)?;
        let access_token = self.jwt.create_access_token(&user.username)?;

        info!("User logged in successfully: {}", username);
        Ok((user, access_token))
    }

    /// Resolve an optional bearer credential to a caller identity
    ///
    /// An absent credential is not an error: the caller is anonymous and is
    /// routed through the stricter shared limit. An invalid or expired
    /// credential resolves the same way; surfaces that mandate login perform
    /// their own check downstream (see [`AuthSystem::current_user`]).
    pub fn resolve_identity(&self, credential: Option<&str>) -> CallerIdentity {
        let Some(credential) = credential else {
            return CallerIdentity::Unauthenticated;
        };

        match self.jwt.verify_token(credential) {
            Ok(claims) => match self.users.find(&claims.sub) {
                Some(user) if !user.disabled => CallerIdentity::authenticated(user.username),
                Some(_) => {
                    debug!("Credential for disabled account: {}", claims.sub);
                    CallerIdentity::Unauthenticated
                }
                None => {
                    debug!("Credential for unknown account: {}", claims.sub);
                    CallerIdentity::Unauthenticated
                }
            },
            Err(_) => CallerIdentity::Unauthenticated,
        }
    }

    /// Look up the account behind an identity
    ///
    /// This is the one place "require authentication" exists: the anonymous
    /// sentinel maps to `Unauthorized`.
    pub fn current_user(&self, identity: &CallerIdentity) -> Result<User> {
        match identity {
            CallerIdentity::Authenticated(id) => self
                .users
                .find(id)
                .ok_or_else(|| GatewayError::not_found("User not found")),
            CallerIdentity::Unauthenticated => {
                Err(GatewayError::unauthorized("Not authenticated"))
            }
        }
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }
}
