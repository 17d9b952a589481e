//! Exponential-backoff retry policy for collaborator calls (spec §5).
//!
//! Base 1s, factor 2, max 10s, up to 3 retries, ~25% jitter. Only
//! connection/no-response/rate-limit/generic-transient errors re-enter;
//! everything else propagates immediately.

use crate::error::FlowError;
use crate::lifecycle::CancellationToken;
use std::time::Duration;

/// Tuning knobs for the retry policy; defaults match spec §5 exactly.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub base: Duration,
    pub factor: u32,
    pub max: Duration,
    pub max_retries: u32,
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            factor: 2,
            max: Duration::from_secs(10),
            max_retries: 3,
            jitter: 0.25,
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before retry attempt `attempt` (1-based), before jitter.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.base.as_millis() as u64 * (self.factor as u64).pow(attempt.saturating_sub(1));
        Duration::from_millis(scaled.min(self.max.as_millis() as u64))
    }

    /// Apply deterministic jitter given a `[0,1)` sample, so callers can
    /// pass a seeded source in tests and `rand`-free randomness in prod
    /// via `jitter_sample`.
    pub fn jittered_delay(&self, attempt: u32, sample: f64) -> Duration {
        let base = self.delay_for(attempt).as_millis() as f64;
        let spread = base * self.jitter;
        let offset = (sample * 2.0 - 1.0) * spread;
        Duration::from_millis((base + offset).max(0.0) as u64)
    }
}

/// Runs `op` under the retry policy, observing `cancel` between attempts.
/// `sample_fn` supplies the jitter sample per attempt (defaults to a
/// fixed midpoint sample in production call sites that don't care).
pub async fn with_retry<T, F, Fut>(
    policy: RetryPolicy,
    cancel: &CancellationToken,
    mut sample_fn: impl FnMut() -> f64,
    mut op: F,
) -> Result<T, FlowError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, FlowError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                if cancel.is_cancelled() {
                    return Err(e);
                }
                let delay = policy.jittered_delay(attempt, sample_fn());
                tokio::time::sleep(delay).await;
                if cancel.is_cancelled() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}
