//! Remote libSQL transient error retry logic.
//!
//! Remote (Hrana) databases occasionally reject statements while a node is
//! being recycled or a shared lock is held during provisioning. These resolve
//! on their own within seconds, so statements against a remote database are
//! retried with capped exponential backoff. Local databases never retry.

use std::time::Duration;

/// Configuration for retry behavior on transient remote errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect transient remote infrastructure errors.
///
/// The predicate is narrow so genuine SQL or constraint errors are never retried.
pub fn is_transient_remote_error(e: &libsql::Error) -> bool {
    let msg = e.to_string().to_ascii_lowercase();
    msg.contains("unable to acquire shared lock")
        || msg.contains("deletion must be in progress")
        || msg.contains("database table is locked")
        || msg.contains("stream expired")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let cfg = RetryConfig::default();
        assert_eq!(cfg.delay_for(1), Duration::from_millis(100));
        assert_eq!(cfg.delay_for(2), Duration::from_millis(200));
        assert_eq!(cfg.delay_for(3), Duration::from_millis(400));
        assert_eq!(cfg.delay_for(10), Duration::from_secs(2));
    }

    #[test]
    fn constraint_errors_are_not_transient() {
        let e = libsql::Error::SqliteFailure(19, "UNIQUE constraint failed: apps.slug".into());
        assert!(!is_transient_remote_error(&e));
    }

    #[test]
    fn lock_errors_are_transient() {
        let e = libsql::Error::Hrana("unable to acquire shared lock on node".into());
        assert!(is_transient_remote_error(&e));
    }
}
