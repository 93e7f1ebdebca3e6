//! Per-identity rate limiting
//!
//! Trailing-window admission control keyed by caller identity. Not a
//! fixed-bucket reset scheme: a client sending requests at window boundaries
//! never gets a doubled quota.

mod limiter;
mod types;

#[cfg(test)]
mod tests;

// Re-export public types
pub use limiter::UsageLedger;
pub use types::{Admission, UsageSnapshot};
