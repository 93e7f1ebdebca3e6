//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::providers::ChatProvider;
use crate::core::rate_limiter::UsageLedger;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in `Arc` for cheap sharing across workers. The
/// usage ledger in particular is the single shared mutable resource every
/// request touches; it is owned here and handed to handlers by reference,
/// never reached through a module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Per-identity usage ledger
    pub ledger: Arc<UsageLedger>,
    /// Outbound AI backend
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: AuthSystem,
        ledger: UsageLedger,
        provider: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            ledger: Arc::new(ledger),
            provider,
        }
    }
}
