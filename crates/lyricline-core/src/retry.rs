//! Retry with exponential backoff for rate-limited remote calls

use std::ops::Range;
use std::time::Duration;

use indicatif::ProgressBar;
use rand::Rng;

use crate::error::{RemoteError, SourceError};

/// Jitter added on top of every backoff, in seconds
pub const DEFAULT_JITTER_SECS: Range<f64> = 1.0..5.0;

/// Retry budget and delay schedule for rate-limited calls.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Retries after the first attempt (R + 1 calls at most)
    pub max_retries: u32,
    /// Delay before the first retry, doubled on every further retry
    pub initial_backoff: Duration,
    /// Uniform jitter range in seconds, half-open
    pub jitter_secs: Range<f64>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(10),
            jitter_secs: DEFAULT_JITTER_SECS,
        }
    }
}

impl BackoffPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
            ..Self::default()
        }
    }

    /// `initial * 2^attempt + U(jitter)`; uncapped, saturating at [`Duration::MAX`].
    pub fn delay(&self, attempt: u32, rng: &mut impl Rng) -> Duration {
        // 2^1023 is the largest finite power of two
        let factor = 2f64.powi(attempt.min(1023) as i32);
        let base = self.initial_backoff.as_secs_f64() * factor;
        let jitter = if self.jitter_secs.is_empty() {
            self.jitter_secs.start
        } else {
            rng.gen_range(self.jitter_secs.clone())
        };
        Duration::try_from_secs_f64(base + jitter).unwrap_or(Duration::MAX)
    }
}

/// Blocking wait used between attempts and between artists.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Parks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<F: FnMut(Duration)> Sleeper for F {
    fn sleep(&mut self, duration: Duration) {
        self(duration);
    }
}

/// Run a remote call, backing off while the source reports rate limiting.
///
/// Attempts are numbered from 0 through `max_retries` inclusive. Only rate-limit
/// failures are retried; any other failure is returned immediately as
/// [`RemoteError::Failed`]. A rate limit on the last attempt yields
/// [`RemoteError::RetriesExhausted`].
pub fn retry_with_backoff<T>(
    label: &str,
    policy: &BackoffPolicy,
    pb: &ProgressBar,
    sleeper: &mut dyn Sleeper,
    mut attempt_fn: impl FnMut() -> Result<T, SourceError>,
) -> Result<T, RemoteError> {
    let max_retries = policy.max_retries;
    let mut rng = rand::thread_rng();
    let mut attempt = 0u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if e.is_rate_limited() && attempt < max_retries => {
                let wait = policy.delay(attempt, &mut rng);
                attempt += 1;
                pb.set_message(format!(
                    "rate limited, retry {attempt}/{max_retries} in {:.1}s",
                    wait.as_secs_f64()
                ));
                log::warn!(
                    "{label}: rate limit exceeded, waiting {:.1}s before retry {attempt}/{max_retries}",
                    wait.as_secs_f64()
                );
                sleeper.sleep(wait);
            }
            Err(e) if e.is_rate_limited() => {
                log::error!(
                    "{label}: rate limit exceeded after {max_retries} retries, consider a longer backoff"
                );
                return Err(RemoteError::RetriesExhausted {
                    cause: e,
                    attempts: attempt + 1,
                });
            }
            Err(e) => {
                log::debug!("{label}: attempt {} failed: {e}", attempt + 1);
                return Err(RemoteError::Failed {
                    cause: e,
                    attempts: attempt + 1,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn rate_limited() -> SourceError {
        SourceError::Http {
            status: Some(429),
            message: "Too Many Requests".to_string(),
        }
    }

    /// Fails with 429 `failures` times, then succeeds.
    fn flaky(
        failures: u32,
    ) -> (
        impl FnMut() -> Result<&'static str, SourceError>,
        Rc<Cell<u32>>,
    ) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let op = move || {
            let n = counter.get();
            counter.set(n + 1);
            if n < failures {
                Err(rate_limited())
            } else {
                Ok("lyrics")
            }
        };
        (op, calls)
    }

    #[test]
    fn delay_grows_exponentially_with_jitter() {
        let policy = BackoffPolicy::new(5, Duration::from_secs(10));
        let mut rng = rand::thread_rng();
        for attempt in 0..5 {
            let base = 10.0 * 2f64.powi(attempt as i32);
            for _ in 0..50 {
                let d = policy.delay(attempt, &mut rng).as_secs_f64();
                assert!(d >= base + 1.0 && d < base + 5.0, "attempt {attempt}: {d}");
            }
        }
    }

    #[test]
    fn empty_jitter_range_uses_start() {
        let policy = BackoffPolicy {
            jitter_secs: 0.0..0.0,
            ..BackoffPolicy::new(3, Duration::from_secs(2))
        };
        let mut rng = rand::thread_rng();
        assert_eq!(policy.delay(0, &mut rng), Duration::from_secs(2));
        assert_eq!(policy.delay(2, &mut rng), Duration::from_secs(8));
    }

    #[test]
    fn huge_attempt_saturates() {
        let policy = BackoffPolicy::new(u32::MAX, Duration::from_secs(10));
        let mut rng = rand::thread_rng();
        assert_eq!(policy.delay(61, &mut rng), Duration::MAX);
        assert_eq!(policy.delay(u32::MAX, &mut rng), Duration::MAX);

        let zero = BackoffPolicy {
            jitter_secs: 0.0..0.0,
            ..BackoffPolicy::new(u32::MAX, Duration::ZERO)
        };
        assert_eq!(zero.delay(u32::MAX, &mut rng), Duration::ZERO);
    }

    #[test]
    fn succeeds_after_five_rate_limits() {
        let policy = BackoffPolicy::new(5, Duration::from_secs(10));
        let mut sleeps = Vec::new();
        let (op, calls) = flaky(5);

        let result = retry_with_backoff(
            "artist",
            &policy,
            &ProgressBar::hidden(),
            &mut |d: Duration| sleeps.push(d),
            op,
        );

        assert_eq!(result.unwrap(), "lyrics");
        assert_eq!(calls.get(), 6);
        assert_eq!(sleeps.len(), 5);
        for (attempt, d) in sleeps.iter().enumerate() {
            let base = 10.0 * 2f64.powi(attempt as i32);
            let secs = d.as_secs_f64();
            assert!(secs >= base + 1.0 && secs < base + 5.0, "sleep {attempt}: {secs}");
        }
    }

    #[test]
    fn exhausts_after_max_retries_plus_one() {
        let policy = BackoffPolicy::new(5, Duration::from_secs(10));
        let mut sleeps = Vec::new();
        let (op, calls) = flaky(6);

        let err = retry_with_backoff(
            "artist",
            &policy,
            &ProgressBar::hidden(),
            &mut |d: Duration| sleeps.push(d),
            op,
        )
        .unwrap_err();

        assert!(err.is_retries_exhausted());
        assert_eq!(err.attempts(), 6);
        assert_eq!(calls.get(), 6);
        assert_eq!(sleeps.len(), 5);
        assert!(err.cause().is_rate_limited());
    }

    #[test]
    fn non_rate_limit_error_is_not_retried() {
        let policy = BackoffPolicy::new(5, Duration::from_secs(10));
        let mut sleeps: Vec<Duration> = Vec::new();
        let mut calls = 0;

        let err = retry_with_backoff(
            "artist",
            &policy,
            &ProgressBar::hidden(),
            &mut |d: Duration| sleeps.push(d),
            || -> Result<(), SourceError> {
                calls += 1;
                Err(SourceError::Http {
                    status: Some(500),
                    message: "boom".to_string(),
                })
            },
        )
        .unwrap_err();

        assert!(!err.is_retries_exhausted());
        assert_eq!(err.attempts(), 1);
        assert_eq!(calls, 1);
        assert!(sleeps.is_empty());
    }

    #[test]
    fn zero_retries_fails_on_first_rate_limit() {
        let policy = BackoffPolicy::new(0, Duration::from_secs(10));
        let mut sleeps: Vec<Duration> = Vec::new();
        let (op, calls) = flaky(1);

        let err = retry_with_backoff(
            "artist",
            &policy,
            &ProgressBar::hidden(),
            &mut |d: Duration| sleeps.push(d),
            op,
        )
        .unwrap_err();

        assert!(err.is_retries_exhausted());
        assert_eq!(calls.get(), 1);
        assert!(sleeps.is_empty());
    }

    #[test]
    fn immediate_success_never_sleeps() {
        let policy = BackoffPolicy::default();
        let mut sleeps: Vec<Duration> = Vec::new();
        let (op, calls) = flaky(0);

        let result = retry_with_backoff(
            "artist",
            &policy,
            &ProgressBar::hidden(),
            &mut |d: Duration| sleeps.push(d),
            op,
        );
        assert!(result.is_ok());
        assert_eq!(calls.get(), 1);
        assert!(sleeps.is_empty());
    }
}
