//! Retry executor
//!
//! Runs a fallible operation until a classifier calls it done, sleeping with
//! exponential backoff in between. The only bound is a wall-clock deadline:
//! there is no attempt cap. A wait that would cross the deadline is cut short
//! at the deadline for one last attempt; a retryable result at or past the
//! deadline is reported as a timeout.
//!
//! Time is read from `tokio::time`, so tests drive the executor with the
//! paused tokio clock.

use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::debug;

/// Delay before the first retry
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Growth factor applied to the delay after every retry
pub const DEFAULT_MULTIPLIER: u32 = 2;

/// Wall-clock budget of one polling loop
pub const DEFAULT_MAX_ELAPSED: Duration = Duration::from_secs(300);

// Stand-in deadline when `max_elapsed` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Exponential backoff bounded by a deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub initial_delay: Duration,
    pub multiplier: u32,
    pub max_elapsed: Duration,
}

impl BackoffPolicy {
    /// Default growth (1s, doubling) with the given budget
    pub fn new(max_elapsed: Duration) -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            max_elapsed,
        }
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Wait before retry number `retry` (0-based)
    ///
    /// Saturates instead of overflowing; never smaller than the previous delay.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.max(1).saturating_pow(retry);
        self.initial_delay.saturating_mul(factor)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ELAPSED)
    }
}

/// How one attempt ended
#[derive(Debug)]
pub enum Verdict<T, E> {
    /// Stop and return the value
    Success(T),
    /// Back off and try again
    Retryable(E),
    /// Stop and return the error
    Terminal(E),
}

/// Failure of a whole retry loop
#[derive(Debug)]
pub enum RetryError<E> {
    /// The classifier gave up on an attempt
    Terminal(E),
    /// The deadline passed while attempts were still retryable
    Timeout {
        attempts: u32,
        elapsed: Duration,
        last: E,
    },
}

/// Run `operation` until `classify` returns a terminal verdict or the
/// policy's deadline passes
///
/// # Arguments
/// * `policy` - Backoff growth and deadline
/// * `operation` - Produces one attempt; called again after every retryable verdict
/// * `classify` - Maps an attempt's raw result to a [`Verdict`]
pub async fn retry<T, R, E, Op, Fut, C>(
    policy: &BackoffPolicy,
    mut operation: Op,
    mut classify: C,
) -> Result<T, RetryError<E>>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = R>,
    C: FnMut(R) -> Verdict<T, E>,
{
    let started = Instant::now();
    let deadline = started
        .checked_add(policy.max_elapsed)
        .unwrap_or(started + FAR_FUTURE);
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        let last = match classify(operation().await) {
            Verdict::Success(value) => {
                debug!(attempts, "Operation succeeded");
                return Ok(value);
            }
            Verdict::Terminal(error) => {
                debug!(attempts, "Operation failed terminally");
                return Err(RetryError::Terminal(error));
            }
            Verdict::Retryable(error) => error,
        };

        let now = Instant::now();
        if now >= deadline {
            return Err(RetryError::Timeout {
                attempts,
                elapsed: started.elapsed(),
                last,
            });
        }

        let delay = policy.delay_for(attempts - 1);
        let wake = match now.checked_add(delay) {
            Some(wake) if wake < deadline => wake,
            _ => deadline,
        };
        debug!(
            attempts,
            delay_ms = (wake - now).as_millis() as u64,
            at_deadline = wake == deadline,
            "Backing off"
        );
        time::sleep_until(wake).await;
    }
}
