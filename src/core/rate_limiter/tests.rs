//! Tests for the usage ledger

#[cfg(test)]
mod tests {
    use super::super::limiter::UsageLedger;
    use super::super::types::Admission;
    use crate::auth::identity::{CallerIdentity, UNAUTHENTICATED_USER_ID};
    use crate::config::RateLimitConfig;
    use std::time::{Duration, Instant};

    fn test_policy() -> RateLimitConfig {
        RateLimitConfig {
            authenticated_rpm: 5,
            anonymous_rpm: 3,
            window_secs: 60,
        }
    }

    fn user(name: &str) -> CallerIdentity {
        CallerIdentity::Authenticated(name.to_string())
    }

    #[tokio::test]
    async fn test_authenticated_admits_within_limit() {
        let ledger = UsageLedger::new(test_policy());
        let identity = user("alice");

        for i in 0..5 {
            let admission = ledger.check_and_record(&identity).await;
            assert!(admission.is_admitted(), "Request {} should be admitted", i);
        }
    }

    #[tokio::test]
    async fn test_sixth_request_rejected_without_phantom_append() {
        let ledger = UsageLedger::new(test_policy());
        let identity = user("alice");

        for _ in 0..5 {
            assert!(ledger.check_and_record(&identity).await.is_admitted());
        }

        let admission = ledger.check_and_record(&identity).await;
        match admission {
            Admission::Rejected {
                usage_count,
                limit,
                retry_after_secs,
            } => {
                assert_eq!(usage_count, 5);
                assert_eq!(limit, 5);
                assert!(retry_after_secs >= 1);
            }
            Admission::Admitted { .. } => panic!("6th request must be rejected"),
        }

        // The rejection must not have consumed quota.
        let snapshot = ledger.snapshot(&identity).await;
        assert_eq!(snapshot.usage_count, 5);
    }

    #[tokio::test]
    async fn test_rejections_never_consume_quota() {
        let ledger = UsageLedger::new(test_policy());
        let identity = CallerIdentity::Unauthenticated;

        let mut admitted = 0;
        for _ in 0..10 {
            if ledger.check_and_record(&identity).await.is_admitted() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 3);
        let stamps = ledger.entries.read().await;
        assert_eq!(stamps.get(UNAUTHENTICATED_USER_ID).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_anonymous_limit_is_stricter() {
        let ledger = UsageLedger::new(test_policy());
        let identity = CallerIdentity::Unauthenticated;

        for _ in 0..3 {
            assert!(ledger.check_and_record(&identity).await.is_admitted());
        }
        assert!(!ledger.check_and_record(&identity).await.is_admitted());
    }

    #[tokio::test]
    async fn test_limit_does_not_depend_on_account_id() {
        let ledger = UsageLedger::new(test_policy());

        for name in ["alice", "bob", "x"] {
            let identity = user(name);
            for _ in 0..5 {
                assert!(ledger.check_and_record(&identity).await.is_admitted());
            }
            assert!(!ledger.check_and_record(&identity).await.is_admitted());
        }
    }

    #[tokio::test]
    async fn test_identities_have_independent_buckets() {
        let ledger = UsageLedger::new(test_policy());

        ledger.check_and_record(&user("user1")).await;
        ledger.check_and_record(&user("user2")).await;
        ledger.check_and_record(&user("user2")).await;

        let first = ledger.snapshot(&user("user1")).await;
        let second = ledger.snapshot(&user("user2")).await;

        assert_eq!(first.usage_count, 1);
        assert_eq!(second.usage_count, 2);
    }

    #[tokio::test]
    async fn test_snapshot_excludes_expired_requests() {
        let ledger = UsageLedger::new(test_policy());
        let identity = user("alice");
        let now = Instant::now();

        // One request outside the 60s window, two inside.
        ledger.entries.write().await.insert(
            "alice".to_string(),
            vec![
                now - Duration::from_secs(90),
                now - Duration::from_secs(30),
                now - Duration::from_secs(10),
            ],
        );

        let snapshot = ledger.snapshot(&identity).await;
        assert_eq!(snapshot.usage_count, 2);
        assert_eq!(snapshot.rate_limit, 5);
        assert_eq!(snapshot.time_window_seconds, 60);
        assert!(snapshot.is_authenticated);
    }

    #[tokio::test]
    async fn test_prune_deletes_expired_entries_from_storage() {
        let ledger = UsageLedger::with_window(test_policy(), Duration::from_millis(50));
        let identity = user("alice");

        ledger.check_and_record(&identity).await;
        tokio::time::sleep(Duration::from_millis(100)).await;

        let snapshot = ledger.snapshot(&identity).await;
        assert_eq!(snapshot.usage_count, 0);

        // Expired timestamps are removed, not merely ignored.
        let entries = ledger.entries.read().await;
        assert!(entries.get("alice").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quota_recovers_once_window_passes() {
        let ledger = UsageLedger::with_window(test_policy(), Duration::from_millis(80));
        let identity = CallerIdentity::Unauthenticated;

        for _ in 0..3 {
            assert!(ledger.check_and_record(&identity).await.is_admitted());
        }
        assert!(!ledger.check_and_record(&identity).await.is_admitted());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(ledger.check_and_record(&identity).await.is_admitted());
    }

    #[tokio::test]
    async fn test_snapshot_does_not_consume_quota() {
        let ledger = UsageLedger::new(test_policy());
        let identity = CallerIdentity::Unauthenticated;

        for _ in 0..20 {
            let snapshot = ledger.snapshot(&identity).await;
            assert_eq!(snapshot.usage_count, 0);
        }

        assert!(ledger.check_and_record(&identity).await.is_admitted());
    }

    #[tokio::test]
    async fn test_snapshot_for_unknown_identity_reports_zero() {
        let ledger = UsageLedger::new(test_policy());

        let snapshot = ledger.snapshot(&CallerIdentity::Unauthenticated).await;
        assert_eq!(snapshot.user_id, UNAUTHENTICATED_USER_ID);
        assert_eq!(snapshot.usage_count, 0);
        assert_eq!(snapshot.rate_limit, 3);
        assert!(!snapshot.is_authenticated);
    }

    #[tokio::test]
    async fn test_concurrent_checks_cannot_exceed_limit() {
        let ledger = UsageLedger::new(test_policy());
        let identity = user("alice");

        let mut handles = Vec::new();
        for _ in 0..20 {
            let ledger = ledger.clone();
            let identity = identity.clone();
            handles.push(tokio::spawn(async move {
                ledger.check_and_record(&identity).await.is_admitted()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 5);
    }
}
