//! Host failover: policies, per-call retry state and optional backoff.
//!
//! A connectivity failure (refused, reset or timed-out connection, unknown
//! host) is the only failure that moves a call to another host. Each
//! top-level call owns a fresh [`RetryState`]; after every failure the
//! [`FailoverPolicy`] is consulted with the incremented count and decides
//! both how many retries are allowed and which host to try next.

use std::time::Duration;

use rand::Rng;

use crate::error::{Error, ErrorKind, Result};

/// Answer of a [`FailoverPolicy`]: the retry budget and the host to use next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverDecision {
    /// Maximum number of retries allowed for the current call.
    pub max_retries: u32,
    /// Base URL of the job server to try next.
    pub next_host: String,
}

impl FailoverDecision {
    /// Create a new decision.
    pub fn new(max_retries: u32, next_host: impl Into<String>) -> Self {
        Self {
            max_retries,
            next_host: next_host.into(),
        }
    }

    /// Returns true if a call that has retried `count` times may retry again.
    pub fn permits(&self, count: u32) -> bool {
        count <= self.max_retries
    }
}

/// Strategy deciding where a call goes after a connectivity failure.
///
/// The policy is queried once per failure with the call's retry count after
/// incrementing (so the first query sees `1`). It may return a different
/// budget or host on every query.
///
/// Any `Fn(u32) -> FailoverDecision` closure is a policy:
///
/// ```rust
/// use sjs_client::{FailoverDecision, FailoverPolicy};
///
/// let policy = |_retry: u32| FailoverDecision::new(2, "http://standby:8090/");
/// assert_eq!(policy.fallback(1).max_retries, 2);
/// ```
pub trait FailoverPolicy: Send + Sync {
    /// Decide the retry budget and next host for the given retry count.
    fn fallback(&self, retry_count: u32) -> FailoverDecision;
}

impl<F> FailoverPolicy for F
where
    F: Fn(u32) -> FailoverDecision + Send + Sync,
{
    fn fallback(&self, retry_count: u32) -> FailoverDecision {
        self(retry_count)
    }
}

/// Round-robin over a fixed list of standby hosts.
#[derive(Debug, Clone)]
pub struct HostRotation {
    hosts: Vec<String>,
    max_retries: u32,
}

impl HostRotation {
    /// Create a rotation over `hosts` with a fixed retry budget.
    ///
    /// Returns a configuration error if `hosts` is empty.
    pub fn new<I, S>(max_retries: u32, hosts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        if hosts.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "host rotation needs at least one standby host".to_string(),
            )));
        }
        Ok(Self { hosts, max_retries })
    }

    /// The standby hosts in rotation order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}

impl FailoverPolicy for HostRotation {
    fn fallback(&self, retry_count: u32) -> FailoverDecision {
        let index = (retry_count.saturating_sub(1) as usize) % self.hosts.len();
        FailoverDecision::new(self.max_retries, self.hosts[index].clone())
    }
}

/// Retry counter for one logical top-level call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    count: u32,
}

impl RetryState {
    /// A fresh state with no retries recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connectivity-failure retries recorded so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record a connectivity failure and return the new count.
    pub fn record_failure(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }
}

/// Backoff strategy for determining delays between failover attempts.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Linear increase in delay (delay * attempt).
    Linear,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with random jitter to avoid thundering herd.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let delay = match self {
            BackoffStrategy::Constant => initial_delay,
            BackoffStrategy::Linear => initial_delay.saturating_mul(attempt.saturating_add(1)),
            BackoffStrategy::Exponential { factor } => {
                let multiplier = factor.powi(attempt as i32);
                Duration::from_secs_f64(
                    (initial_delay.as_secs_f64() * multiplier).min(max_delay.as_secs_f64()),
                )
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base_multiplier = factor.powi(attempt as i32);
                let base_delay =
                    (initial_delay.as_secs_f64() * base_multiplier).min(max_delay.as_secs_f64());

                // Jitter: random value between 0 and base_delay
                let jitter = rand::rng().random::<f64>() * base_delay;

                Duration::from_secs_f64(base_delay + jitter)
            }
        };

        std::cmp::min(delay, max_delay)
    }
}

/// Delay applied before each failover attempt.
#[derive(Debug, Clone, Copy)]
pub struct FailoverBackoff {
    /// Backoff strategy to use.
    pub strategy: BackoffStrategy,
    /// Delay before the first failover attempt.
    pub initial_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for FailoverBackoff {
    fn default() -> Self {
        Self {
            strategy: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl FailoverBackoff {
    /// Constant delay between failover attempts.
    pub fn constant(delay: Duration) -> Self {
        Self {
            strategy: BackoffStrategy::Constant,
            initial_delay: delay,
            max_delay: delay,
        }
    }

    /// Delay before the failover attempt following the `retry_count`-th failure.
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        self.strategy.delay(
            retry_count.saturating_sub(1),
            self.initial_delay,
            self.max_delay,
        )
    }
}
