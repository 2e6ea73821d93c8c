use std::collections::HashMap;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::login::errors::LockedOut;

/// Throttling policy. Defaults match the long-standing constants: 5
/// consecutive failures lock an email out for 30 minutes.
#[derive(Debug, Clone)]
pub struct ThrottlePolicy {
    pub max_failures: u32,
    pub lockout: Duration,
    /// When enabled, a successful login clears a sub-limit failure count.
    /// Off by default: historically only lockout expiry clears an entry.
    pub reset_on_success: bool,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            max_failures: 5,
            lockout: Duration::minutes(30),
            reset_on_success: false,
        }
    }
}

/// Consecutive-failure record for one email.
///
/// `first_failure_at` anchors the lockout window to the FIRST failure of
/// the current run; later failures do not move it.
#[derive(Debug, Clone)]
struct ThrottleEntry {
    failures: u32,
    first_failure_at: DateTime<Utc>,
}

/// Per-email login failure tracker.
///
/// Process-local state, rebuilt empty on restart; lockouts do not survive
/// a restart and are not shared across replicas. Entries are keyed by the
/// login email as supplied, which may reference a nonexistent account.
///
/// A single coarse lock guards the table; it is held only for map
/// operations, never across await points.
pub struct LoginThrottle {
    policy: ThrottlePolicy,
    entries: Mutex<HashMap<String, ThrottleEntry>>,
}

impl LoginThrottle {
    /// Entries older than this multiple of the lockout window are eligible
    /// for [`evict_stale`](Self::evict_stale).
    const STALE_WINDOW_MULTIPLIER: i32 = 4;

    pub fn new(policy: ThrottlePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Gate a login attempt for `email`.
    ///
    /// Passes unless the email has reached the failure limit within the
    /// lockout window. A locked entry whose window has elapsed is removed
    /// here, as a side effect of the check, and the attempt proceeds.
    ///
    /// # Errors
    /// * `LockedOut` - Limit reached and the window has not elapsed yet
    pub fn check(&self, email: &str, now: DateTime<Utc>) -> Result<(), LockedOut> {
        let mut entries = self.entries.lock().expect("throttle table lock poisoned");

        let Some(entry) = entries.get(email) else {
            return Ok(());
        };

        if entry.failures < self.policy.max_failures {
            return Ok(());
        }

        if now - entry.first_failure_at < self.policy.lockout {
            return Err(LockedOut {
                retry_after_minutes: self.retry_after_minutes(),
            });
        }

        entries.remove(email);
        Ok(())
    }

    /// Record one failed attempt for `email`.
    ///
    /// The first failure of a run stamps the window start; subsequent
    /// failures only increment the counter.
    pub fn record_failure(&self, email: &str, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().expect("throttle table lock poisoned");

        entries
            .entry(email.to_string())
            .and_modify(|entry| entry.failures += 1)
            .or_insert(ThrottleEntry {
                failures: 1,
                first_failure_at: now,
            });
    }

    /// Record a successful login. Clears the entry only when the policy
    /// enables reset-on-success.
    pub fn record_success(&self, email: &str) {
        if !self.policy.reset_on_success {
            return;
        }

        self.entries
            .lock()
            .expect("throttle table lock poisoned")
            .remove(email);
    }

    /// Drop entries whose window started more than 4x the lockout duration
    /// ago, bounding table growth from emails that never reach the limit.
    ///
    /// Returns the number of evicted entries.
    pub fn evict_stale(&self, now: DateTime<Utc>) -> usize {
        let cutoff = self.policy.lockout * Self::STALE_WINDOW_MULTIPLIER;
        let mut entries = self.entries.lock().expect("throttle table lock poisoned");

        let before = entries.len();
        entries.retain(|_, entry| now - entry.first_failure_at < cutoff);
        before - entries.len()
    }

    /// Current consecutive-failure count for an email, if any.
    pub fn failure_count(&self, email: &str) -> Option<u32> {
        self.entries
            .lock()
            .expect("throttle table lock poisoned")
            .get(email)
            .map(|entry| entry.failures)
    }

    // Reported wait is the ceiling of the FULL lockout duration in minutes,
    // not the time actually remaining. Kept for compatibility with the
    // historical responses.
    fn retry_after_minutes(&self) -> i64 {
        (self.policy.lockout.num_milliseconds() + 59_999) / 60_000
    }
}
