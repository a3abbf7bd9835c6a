//! Retry policy and backoff schedule.

use std::time::Duration;

use crate::config::{RETRY_BASE_DELAY_MS, RETRY_MAX_RETRIES};

/// Exponential backoff policy.
///
/// An operation runs at most `max_retries + 1` times. The wait before retry
/// `n` (zero-based) is `base_delay * 2^n`, clamped to `max_delay` when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub base_delay: Duration,
    /// Upper bound on a single wait.
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: RETRY_MAX_RETRIES,
            base_delay: Duration::from_millis(RETRY_BASE_DELAY_MS),
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: None,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Total attempts including the initial one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before zero-based retry `n`. Saturates at `Duration::MAX`.
    pub fn delay_for(&self, n: u32) -> Duration {
        let raw = if self.base_delay.is_zero() {
            Duration::ZERO
        } else {
            1u128
                .checked_shl(n)
                .map(|factor| self.base_delay.as_nanos().saturating_mul(factor))
                .and_then(duration_from_nanos)
                .unwrap_or(Duration::MAX)
        };
        match self.max_delay {
            Some(cap) => raw.min(cap),
            None => raw,
        }
    }

    /// Backoff schedule, one entry per retry. Used as the `tokio-retry` strategy.
    pub fn delays(&self) -> Backoff {
        Backoff {
            policy: *self,
            next: 0,
        }
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// `None` when `nanos` does not fit in a `Duration`.
fn duration_from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
}

/// Iterator over the waits of a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: RetryPolicy,
    next: u32,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.next >= self.policy.max_retries {
            return None;
        }
        let delay = self.policy.delay_for(self.next);
        self.next += 1;
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.policy.max_retries - self.next) as usize;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_retries, 3);
        assert_eq!(p.base_delay, Duration::from_millis(1000));
        assert_eq!(p.max_delay, None);
        assert_eq!(p.max_attempts(), 4);
    }

    #[test]
    fn test_delays_double() {
        let p = RetryPolicy::new(3, Duration::from_millis(100));
        let delays: Vec<Duration> = p.delays().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400)
            ]
        );
    }

    #[test]
    fn test_no_delays_without_retries() {
        let p = RetryPolicy::new(0, Duration::from_millis(100));
        assert_eq!(p.delays().count(), 0);
        assert_eq!(p.max_attempts(), 1);
    }

    #[test]
    fn test_delays_capped() {
        let p = RetryPolicy::new(5, Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300));
        let delays: Vec<u128> = p.delays().map(|d| d.as_millis()).collect();
        assert_eq!(delays, vec![100, 200, 300, 300, 300]);
    }

    #[test]
    fn test_delay_saturates_instead_of_overflowing() {
        let p = RetryPolicy::new(u32::MAX, Duration::MAX / 2);
        assert_eq!(p.delay_for(2), Duration::MAX);
        let one_sec = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        // Keeps doubling past 2^32
        assert_eq!(one_sec.delay_for(40), Duration::from_secs(1 << 40));
        assert_eq!(one_sec.delay_for(63), Duration::from_secs(1 << 63));
        assert_eq!(one_sec.delay_for(64), Duration::MAX);
        assert_eq!(one_sec.delay_for(200), Duration::MAX);
        assert_eq!(one_sec.delay_for(u32::MAX), Duration::MAX);
        assert_eq!(
            RetryPolicy::new(3, Duration::ZERO).delay_for(u32::MAX),
            Duration::ZERO
        );
        assert_eq!(p.max_attempts(), u32::MAX);
    }

    #[test]
    fn test_backoff_size_hint() {
        let p = RetryPolicy::new(3, Duration::from_millis(10));
        let mut delays = p.delays();
        assert_eq!(delays.size_hint(), (3, Some(3)));
        delays.next();
        assert_eq!(delays.size_hint(), (2, Some(2)));
    }
}
