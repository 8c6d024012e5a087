//! Bounded poll-with-timeout primitives.
//!
//! Neither the orchestrator nor the node agent pushes notifications, so
//! every wait in the suite is a convergence wait: poll an observable at a
//! fixed interval until it reaches the expected state or a deadline
//! expires. This library makes that pattern explicit:
//!
//! - **Observable**: a probe closure querying external state.
//! - **Convergence**: the probe reporting the expected state.
//! - **Deadline**: a hard timeout that converts the wait into an error.
//!
//! # Invariants
//!
//! - The probe runs at least once, even with a zero timeout.
//! - Timeouts carry the last observed state for diagnostics.
//! - Waits never retry past the deadline.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

/// Default interval between probe attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default deadline for a convergence wait.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Convergence errors.
#[derive(Debug, Error)]
pub enum ConvergeError {
    /// Deadline expired before the observable converged.
    #[error("timeout after {elapsed:?} waiting for {resource} (last observed: {last})")]
    Timeout {
        resource: String,
        elapsed: Duration,
        last: String,
    },
}

/// Interval and deadline for a single convergence wait.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Pause between probe attempts.
    pub interval: Duration,

    /// Hard deadline for the wait.
    pub timeout: Duration,
}

impl PollSettings {
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// One-minute deadline variant, used for slow agent-side convergence.
    pub const fn minute() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::from_secs(60),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Poll `probe` until it reports true or the deadline expires.
pub async fn wait_until<F, Fut>(
    resource: &str,
    settings: PollSettings,
    mut probe: F,
) -> Result<(), ConvergeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        if probe().await {
            debug!(resource, attempt, "converged");
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= settings.timeout {
            return Err(ConvergeError::Timeout {
                resource: resource.to_string(),
                elapsed,
                last: "false".to_string(),
            });
        }
        tokio::time::sleep(settings.interval).await;
    }
}

/// Poll `probe` until its string output equals `expected` or the deadline
/// expires. The timeout error carries the last observed value.
pub async fn wait_for_value<F, Fut>(
    resource: &str,
    settings: PollSettings,
    expected: &str,
    mut probe: F,
) -> Result<(), ConvergeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = String>,
{
    let start = Instant::now();

    loop {
        let observed = probe().await;
        if observed == expected {
            debug!(resource, value = %observed, "converged");
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= settings.timeout {
            return Err(ConvergeError::Timeout {
                resource: resource.to_string(),
                elapsed,
                last: observed,
            });
        }
        tokio::time::sleep(settings.interval).await;
    }
}

/// Retry a fallible operation until it succeeds or the deadline expires.
/// The timeout error carries the last failure.
pub async fn retry_until_ok<F, Fut, T>(
    resource: &str,
    settings: PollSettings,
    mut op: F,
) -> Result<T, ConvergeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let start = Instant::now();

    loop {
        let err = match op().await {
            Ok(value) => {
                debug!(resource, "operation succeeded");
                return Ok(value);
            }
            Err(err) => err,
        };

        let elapsed = start.elapsed();
        if elapsed >= settings.timeout {
            return Err(ConvergeError::Timeout {
                resource: resource.to_string(),
                elapsed,
                last: format!("{err:#}"),
            });
        }
        debug!(resource, error = %err, "operation failed, retrying");
        tokio::time::sleep(settings.interval).await;
    }
}
