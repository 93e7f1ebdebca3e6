//! Rate limiter types and data structures

use serde::Serialize;

/// Outcome of an admission check
///
/// A rejection is an expected outcome, not an error: callers branch on the
/// variant and map `Rejected` to a "too many requests" response. A rejected
/// request consumes no quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed; its timestamp has been recorded
    Admitted {
        /// Requests now counted in the window, including this one
        usage_count: u32,
        /// Maximum requests allowed in the window
        limit: u32,
        /// Requests left in the window
        remaining: u32,
    },
    /// The request must not proceed; nothing was recorded
    Rejected {
        /// Requests currently counted in the window
        usage_count: u32,
        /// Maximum requests allowed in the window
        limit: u32,
        /// Seconds until the oldest in-window request ages out
        retry_after_secs: u64,
    },
}

impl Admission {
    /// Whether the request was admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Point-in-time view of one identity's usage, for self-service introspection
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UsageSnapshot {
    /// Ledger key of the identity (account id or the anonymous sentinel)
    pub user_id: String,
    /// Requests counted in the trailing window right now
    pub usage_count: u32,
    /// Maximum requests allowed in the window for this identity
    pub rate_limit: u32,
    /// Window length in seconds
    pub time_window_seconds: u64,
    /// Whether this identity is a verified account
    pub is_authenticated: bool,
}
