//! # Retry policy for connection establishment.
//!
//! [`RetryPolicy`] controls how long the runtime waits between reconnect
//! attempts after a factory/consume failure. It is parameterized by:
//! - [`RetryPolicy::wait`] the initial delay;
//! - [`RetryPolicy::factor`] the multiplicative growth factor;
//! - [`RetryPolicy::max`] the maximum delay cap;
//! - [`RetryPolicy::jitter`] randomization applied to the computed delay.
//!
//! The delay for attempt `n` (0-indexed) is `wait × factor^n`, clamped to
//! `max`, then jitter is applied. The base delay derives purely from the
//! attempt number, so jitter output never feeds back into later attempts.
//!
//! The policy only applies to connection establishment. Processing failures
//! are governed by [`FailureStrategy`](crate::FailureStrategy), and
//! steady-state consumer errors are terminal without retry.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use queuevisor::{Jitter, RetryPolicy};
//!
//! let retry = RetryPolicy {
//!     wait: Duration::from_millis(100),
//!     max: Duration::from_secs(10),
//!     factor: 2.0,
//!     jitter: Jitter::None,
//! };
//!
//! assert_eq!(retry.delay_for(0), Duration::from_millis(100));
//! assert_eq!(retry.delay_for(1), Duration::from_millis(200));
//! // 100ms × 2^10 = 102_400ms → capped at max=10s
//! assert_eq!(retry.delay_for(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

use rand::Rng;

/// Randomization applied to reconnect delays.
///
/// Prevents synchronized reconnect storms when many components lose the same
/// broker at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Jitter {
    /// No jitter: use the exact computed delay (default, predictable).
    #[default]
    None,
    /// Random delay in `[0, computed]`. Maximum load spreading.
    Full,
    /// `computed/2 + random[0, computed/2]`. Balanced randomness.
    Equal,
}

impl Jitter {
    fn apply(&self, delay: Duration) -> Duration {
        match self {
            Jitter::None => delay,
            Jitter::Full => {
                let ms = delay.as_millis() as u64;
                if ms == 0 {
                    return Duration::ZERO;
                }
                Duration::from_millis(rand::rng().random_range(0..=ms))
            }
            Jitter::Equal => {
                let ms = delay.as_millis() as u64;
                if ms == 0 {
                    return Duration::ZERO;
                }
                let half = ms / 2;
                let spread = if half == 0 {
                    0
                } else {
                    rand::rng().random_range(0..=half)
                };
                Duration::from_millis(half + spread)
            }
        }
    }
}

/// Reconnect delay policy.
///
/// The default preserves the flat retry-wait semantics: `factor = 1.0` keeps
/// the delay constant at [`RetryPolicy::wait`], with no jitter.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub wait: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Randomization strategy.
    pub jitter: Jitter,
}

impl Default for RetryPolicy {
    /// Returns a policy with `wait = 100ms`, `max = 30s`, `factor = 1.0`
    /// (constant delay), no jitter.
    fn default() -> Self {
        Self {
            wait: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: Jitter::None,
        }
    }
}

impl RetryPolicy {
    /// Returns a constant-delay policy: every retry waits exactly `wait`.
    pub fn fixed(wait: Duration) -> Self {
        Self {
            wait,
            max: wait,
            factor: 1.0,
            jitter: Jitter::None,
        }
    }

    /// Computes the delay before retry number `attempt` (0-indexed).
    ///
    /// The base is `wait × factor^attempt`, clamped to [`RetryPolicy::max`];
    /// jitter is applied to the clamped base and never fed back into
    /// subsequent calculations.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let raw_secs = self.wait.as_secs_f64() * self.factor.powi(exp);

        let base = if !raw_secs.is_finite() || raw_secs < 0.0 || raw_secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(raw_secs)
        };

        self.jitter.apply(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_attempt_zero_returns_wait() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
            jitter: Jitter::None,
        };
        assert_eq!(retry.delay_for(0), Duration::from_millis(100));
    }

    #[test]
    fn test_exponential_growth_no_jitter() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(100),
            max: Duration::from_secs(30),
            factor: 2.0,
            jitter: Jitter::None,
        };

        assert_eq!(retry.delay_for(1), Duration::from_millis(200));
        assert_eq!(retry.delay_for(2), Duration::from_millis(400));
        assert_eq!(retry.delay_for(3), Duration::from_millis(800));
    }

    #[test]
    fn test_fixed_policy_is_constant() {
        let retry = RetryPolicy::fixed(Duration::from_millis(500));
        for attempt in 0..10 {
            assert_eq!(
                retry.delay_for(attempt),
                Duration::from_millis(500),
                "attempt {} should be constant at 500ms",
                attempt
            );
        }
    }

    #[test]
    fn test_clamped_to_max() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(100),
            max: Duration::from_secs(1),
            factor: 2.0,
            jitter: Jitter::None,
        };
        assert_eq!(retry.delay_for(10), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_exceeds_max() {
        let retry = RetryPolicy {
            wait: Duration::from_secs(10),
            max: Duration::from_secs(5),
            factor: 2.0,
            jitter: Jitter::None,
        };
        assert_eq!(retry.delay_for(0), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_wait_is_allowed() {
        let retry = RetryPolicy::fixed(Duration::ZERO);
        assert_eq!(retry.delay_for(0), Duration::ZERO);
        assert_eq!(retry.delay_for(7), Duration::ZERO);
    }

    #[test]
    fn test_no_jitter_keeps_sub_millisecond_delay() {
        let retry = RetryPolicy {
            wait: Duration::from_micros(500),
            max: Duration::from_secs(1),
            factor: 1.0,
            jitter: Jitter::None,
        };
        assert_eq!(retry.delay_for(0), Duration::from_micros(500));
        assert_eq!(retry.delay_for(3), Duration::from_micros(500));
    }

    #[test]
    fn test_full_jitter_bounds() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(1000),
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: Jitter::Full,
        };
        for attempt in 0..50 {
            assert!(retry.delay_for(attempt) <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(1000),
            max: Duration::from_secs(30),
            factor: 1.0,
            jitter: Jitter::Equal,
        };
        for attempt in 0..50 {
            let delay = retry.delay_for(attempt);
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_non_finite_overflow_clamps_to_max() {
        let retry = RetryPolicy {
            wait: Duration::from_millis(100),
            max: Duration::from_secs(10),
            factor: 2.0,
            jitter: Jitter::None,
        };
        assert_eq!(retry.delay_for(u32::MAX), Duration::from_secs(10));
    }
}
