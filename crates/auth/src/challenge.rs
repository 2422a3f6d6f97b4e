//! Short-lived verification challenges (password reset, device confirmation).
//!
//! Codes are held server-side and never embedded in tokens: a challenge is
//! issued under a key (typically the account id), redeemed at most once, and
//! dead the moment its TTL lapses.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// One issued verification code with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    code: String,
    expires_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(code: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: code.into(),
            expires_at: issued_at + ttl,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expiry boundary is exclusive: a challenge is dead at `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Storage for outstanding challenges.
///
/// `redeem` is the only consuming operation: it returns `true` exactly when a
/// live challenge under `key` carries `code`, and removes it so a second
/// attempt with the same code fails. Expired challenges never redeem.
pub trait ChallengeStore: Send + Sync {
    /// Issue a challenge under `key`, replacing any outstanding one.
    fn issue(&self, key: &str, challenge: Challenge);

    fn redeem(&self, key: &str, code: &str, now: DateTime<Utc>) -> bool;

    /// Drop every challenge already expired at `now`.
    fn sweep(&self, now: DateTime<Utc>);
}

impl<S: ChallengeStore + ?Sized> ChallengeStore for Arc<S> {
    fn issue(&self, key: &str, challenge: Challenge) {
        (**self).issue(key, challenge)
    }

    fn redeem(&self, key: &str, code: &str, now: DateTime<Utc>) -> bool {
        (**self).redeem(key, code, now)
    }

    fn sweep(&self, now: DateTime<Utc>) {
        (**self).sweep(now)
    }
}
