//! Challenge storage implementations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use fleetdesk_auth::{Challenge, ChallengeStore};

/// In-memory challenge store for tests/dev.
///
/// Expired entries are dropped lazily on redeem and in bulk by [`sweep`];
/// a wrong code leaves the challenge outstanding so the caller may retry
/// until it expires.
///
/// [`sweep`]: ChallengeStore::sweep
#[derive(Debug, Default)]
pub struct InMemoryChallengeStore {
    inner: RwLock<HashMap<String, Challenge>>,
}

impl InMemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Outstanding challenge count, dead entries included until swept.
    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChallengeStore for InMemoryChallengeStore {
    fn issue(&self, key: &str, challenge: Challenge) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key.to_string(), challenge);
        }
    }

    fn redeem(&self, key: &str, code: &str, now: DateTime<Utc>) -> bool {
        let mut map = match self.inner.write() {
            Ok(m) => m,
            Err(_) => return false,
        };

        match map.get(key) {
            Some(challenge) if challenge.is_expired(now) => {
                map.remove(key);
                false
            }
            Some(challenge) if challenge.code() == code => {
                map.remove(key);
                true
            }
            _ => false,
        }
    }

    fn sweep(&self, now: DateTime<Utc>) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|_, challenge| !challenge.is_expired(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ten_minute_challenge(code: &str, issued: DateTime<Utc>) -> Challenge {
        Challenge::new(code, issued, Duration::minutes(10))
    }

    #[test]
    fn a_challenge_redeems_exactly_once() {
        let store = InMemoryChallengeStore::new();
        let now = Utc::now();
        store.issue("account-1", ten_minute_challenge("483920", now));

        assert!(store.redeem("account-1", "483920", now));
        // Consumed: the same code never works twice.
        assert!(!store.redeem("account-1", "483920", now));
    }

    #[test]
    fn wrong_code_leaves_the_challenge_outstanding() {
        let store = InMemoryChallengeStore::new();
        let now = Utc::now();
        store.issue("account-1", ten_minute_challenge("483920", now));

        assert!(!store.redeem("account-1", "000000", now));
        assert!(store.redeem("account-1", "483920", now));
    }

    #[test]
    fn expired_challenges_never_redeem() {
        let store = InMemoryChallengeStore::new();
        let issued = Utc::now();
        store.issue("account-1", ten_minute_challenge("483920", issued));

        let later = issued + Duration::minutes(10);
        assert!(!store.redeem("account-1", "483920", later));
        // The dead entry was dropped on touch.
        assert!(store.is_empty());
    }

    #[test]
    fn reissue_replaces_the_previous_challenge() {
        let store = InMemoryChallengeStore::new();
        let now = Utc::now();
        store.issue("account-1", ten_minute_challenge("111111", now));
        store.issue("account-1", ten_minute_challenge("222222", now));

        assert!(!store.redeem("account-1", "111111", now));
        assert!(store.redeem("account-1", "222222", now));
    }

    #[test]
    fn sweep_drops_only_expired_entries() {
        let store = InMemoryChallengeStore::new();
        let issued = Utc::now();
        store.issue("old", ten_minute_challenge("111111", issued));
        store.issue("fresh", ten_minute_challenge("222222", issued + Duration::minutes(8)));

        store.sweep(issued + Duration::minutes(12));

        assert_eq!(store.len(), 1);
        assert!(store.redeem("fresh", "222222", issued + Duration::minutes(12)));
    }
}
