//! In-memory user table
//!
//! Accounts live for the process lifetime only; there is no backing store.
//! The table is shared across request handlers and mutated concurrently,
//! so it is keyed through a sharded concurrent map.

use crate::auth::identity::UNAUTHENTICATED_USER_ID;
use crate::utils::crypto;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// A registered account
#[derive(Debug, Clone)]
pub struct User {
    /// Unique account id
    pub username: String,
    /// Contact email
    pub email: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Argon2 password hash
    pub password_hash: String,
    /// Disabled accounts cannot log in or authenticate
    pub disabled: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Concurrent username -> account map
#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, User>,
}

impl UserStore {
    /// Create an empty user store
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Create a new account
    ///
    /// Fails with `Conflict` when the username is taken and with
    /// `Validation` when the username or password is unacceptable.
    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        validate_username(&new_user.username)?;
        validate_password(&new_user.password)?;

        let password_hash = crypto::hash_password(&new_user.password)?;

        let user = User {
            username: new_user.username.clone(),
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash,
            disabled: false,
            created_at: Utc::now(),
        };

        match self.users.entry(new_user.username) {
            Entry::Occupied(_) => Err(GatewayError::conflict("Username already registered")),
            Entry::Vacant(entry) => {
                entry.insert(user.clone());
                Ok(user)
            }
        }
    }

    /// Look up an account by username
    pub fn find(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    /// Verify a username/password pair
    ///
    /// The error message never reveals which of the two was wrong.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .find(username)
            .ok_or_else(|| GatewayError::auth("Incorrect username or password"))?;

        if !crypto::verify_password(password, &user.password_hash)? {
            return Err(GatewayError::auth("Incorrect username or password"));
        }

        if user.disabled {
            return Err(GatewayError::auth("Account is not active"));
        }

        Ok(user)
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.len() < 3 || username.len() > 64 {
        return Err(GatewayError::validation(
            "Username must be between 3 and 64 characters",
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(GatewayError::validation(
            "Username may only contain letters, digits, underscores and dashes",
        ));
    }

    // The anonymous ledger key is reserved; an account under this name would
    // let an unauthenticated caller impersonate an authenticated one.
    if username == UNAUTHENTICATED_USER_ID {
        return Err(GatewayError::validation("Username is reserved"));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(GatewayError::validation(
            "Password must be at least 8 characters",
        ));
    }

    Ok(())
}
