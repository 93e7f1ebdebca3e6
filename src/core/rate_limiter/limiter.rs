//! Usage ledger implementation

use super::types::{Admission, UsageSnapshot};
use crate::auth::identity::CallerIdentity;
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Per-identity usage ledger with trailing-window admission control
///
/// Holds the request history of every caller identity for the current
/// window. One ledger instance is shared by all in-flight requests; the
/// check-prune-count-decide-append sequence runs under a single write lock,
/// so two concurrent requests for the same identity can never both slip
/// under the limit (the classic check-then-act race).
///
/// Entries are pruned on every check rather than by a background sweeper,
/// which keeps the ledger self-cleaning with the lock as the only
/// synchronization primitive. The window bounds each sequence's length by
/// the rate limit itself, so the per-check work stays small.
pub struct UsageLedger {
    /// Rate limit policy (per-identity-kind limits and window length)
    pub(super) policy: RateLimitConfig,
    /// Request timestamps by ledger key
    pub(super) entries: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    /// Window duration
    pub(super) window: Duration,
}

impl UsageLedger {
    /// Create a new usage ledger
    pub fn new(policy: RateLimitConfig) -> Self {
        let window = Duration::from_secs(policy.window_secs);
        Self {
            policy,
            entries: Arc::new(RwLock::new(HashMap::new())),
            window,
        }
    }

    /// Create a usage ledger with a custom window
    pub fn with_window(policy: RateLimitConfig, window: Duration) -> Self {
        Self {
            policy,
            entries: Arc::new(RwLock::new(HashMap::new())),
            window,
        }
    }

    /// The request limit that applies to an identity
    ///
    /// Derived from the identity kind alone: every authenticated account
    /// gets the same limit and the anonymous sentinel gets the stricter one.
    pub fn limit_for(&self, identity: &CallerIdentity) -> u32 {
        if identity.is_authenticated() {
            self.policy.authenticated_rpm
        } else {
            self.policy.anonymous_rpm
        }
    }

    /// Atomically check and record a request
    ///
    /// Prunes expired timestamps, counts the rest, and either records the
    /// request and admits it, or rejects it without recording anything.
    pub async fn check_and_record(&self, identity: &CallerIdentity) -> Admission {
        let now = Instant::now();
        let window_start = now.checked_sub(self.window);
        let limit = self.limit_for(identity);
        let key = identity.ledger_key();

        let mut entries = self.entries.write().await;
        let stamps = entries.entry(key.to_string()).or_default();

        prune(stamps, window_start);

        let usage_count = stamps.len() as u32;
        if usage_count >= limit {
            let retry_after_secs = self.retry_after(stamps, now);
            debug!(
                "Rate limit exceeded for {}: {}/{} requests",
                key, usage_count, limit
            );
            return Admission::Rejected {
                usage_count,
                limit,
                retry_after_secs,
            };
        }

        stamps.push(now);
        let usage_count = usage_count + 1;

        Admission::Admitted {
            usage_count,
            limit,
            remaining: limit - usage_count,
        }
    }

    /// Current usage for an identity, without recording anything
    ///
    /// Applies the same prune step as [`UsageLedger::check_and_record`], so
    /// the reported count never includes expired requests and matches what
    /// an admission check would see at the same instant.
    pub async fn snapshot(&self, identity: &CallerIdentity) -> UsageSnapshot {
        let now = Instant::now();
        let window_start = now.checked_sub(self.window);
        let limit = self.limit_for(identity);
        let key = identity.ledger_key();

        let mut entries = self.entries.write().await;
        let usage_count = match entries.get_mut(key) {
            Some(stamps) => {
                prune(stamps, window_start);
                stamps.len() as u32
            }
            None => 0,
        };

        UsageSnapshot {
            user_id: key.to_string(),
            usage_count,
            rate_limit: limit,
            time_window_seconds: self.window.as_secs(),
            is_authenticated: identity.is_authenticated(),
        }
    }

    /// Seconds until the oldest in-window timestamp ages out
    fn retry_after(&self, stamps: &[Instant], now: Instant) -> u64 {
        let secs = match stamps.first() {
            Some(&oldest) => self
                .window
                .saturating_sub(now.duration_since(oldest))
                .as_secs(),
            None => self.window.as_secs(),
        };
        secs.max(1)
    }
}

/// Remove every timestamp that falls outside the trailing window
///
/// Timestamps are appended in request order, so the retained slice stays
/// chronologically sorted. `window_start` is `None` only when the process
/// is younger than the window itself, in which case nothing can be stale.
fn prune(stamps: &mut Vec<Instant>, window_start: Option<Instant>) {
    if let Some(window_start) = window_start {
        stamps.retain(|&t| t > window_start);
    }
}

impl Clone for UsageLedger {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            entries: self.entries.clone(),
            window: self.window,
        }
    }
}
