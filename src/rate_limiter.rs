//! Per-host rate limiting.
//!
//! Combines a bounded concurrency gate (a semaphore) with a minimum
//! inter-request delay measured on a monotonic clock. Each host gets its own
//! [`Semaphore`] and pacing state, discovered lazily via [`DashMap`]; the
//! pacing fields (last-completed timestamp, current delay, success counter)
//! live behind one [`parking_lot::Mutex`] per host so the adaptive backoff
//! logic never races with the delay computation.
//!
//! Grounded on the teacher's `crawl_engine/domain_limiter.rs` (the
//! semaphore-per-host shape, including its closed-semaphore recovery loop)
//! and `crawl_engine/rate_limiter.rs` (lazy per-host state via `DashMap`).

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default minimum delay between completed requests to the same host.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
/// Default number of concurrent in-flight requests allowed per host.
pub const DEFAULT_CONCURRENT: usize = 3;
/// Default adaptive backoff multiplier.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
/// Default ceiling for the adaptive delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);
/// Default floor for the adaptive delay.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(100);
/// Default number of consecutive successes required before the delay shrinks.
pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 10;

struct Pacing {
    last_completed: Option<Instant>,
    delay: Duration,
    success_count: u32,
}

struct HostState {
    semaphore: Arc<Semaphore>,
    pacing: Mutex<Pacing>,
}

/// A held rate-limit slot. Releases its semaphore permit when dropped,
/// regardless of how the caller's request finished.
pub struct RateLimitSlot {
    _permit: OwnedSemaphorePermit,
}

/// Per-host options, settable at any time via [`PerHostRateLimiter::configure_host`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HostOverride {
    pub delay: Option<Duration>,
    pub concurrent: Option<usize>,
}

/// Per-host-aware rate limiter with an optional adaptive backoff mode.
///
/// When `adaptive` is enabled, [`record_rate_limit`](Self::record_rate_limit)
/// and [`record_success`](Self::record_success) adjust the host's effective
/// delay in response to HTTP 429s and sustained success, per §4.1 of the
/// fetch engine's per-host rate limiter contract.
pub struct PerHostRateLimiter {
    hosts: DashMap<String, Arc<HostState>>,
    overrides: DashMap<String, HostOverride>,
    default_delay: Duration,
    default_concurrent: usize,
    adaptive: bool,
    backoff_factor: f64,
    max_delay: Duration,
    min_delay: Duration,
    success_threshold: u32,
}

impl PerHostRateLimiter {
    #[must_use]
    pub fn new(default_delay: Duration, default_concurrent: usize) -> Self {
        Self {
            hosts: DashMap::new(),
            overrides: DashMap::new(),
            default_delay,
            default_concurrent,
            adaptive: false,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            max_delay: DEFAULT_MAX_DELAY,
            min_delay: DEFAULT_MIN_DELAY,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }

    #[must_use]
    pub fn adaptive(mut self) -> Self {
        self.adaptive = true;
        self
    }

    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }

    /// Set a per-host override. Concurrency changes apply only to hosts not
    /// yet observed (the semaphore for an already-running host keeps its
    /// existing capacity); a delay override takes effect on the host's next
    /// acquisition.
    pub fn configure_host(&self, host: &str, over: HostOverride) {
        self.overrides.insert(host.to_string(), over);
        if let Some(delay) = over.delay {
            if let Some(state) = self.hosts.get(host) {
                state.pacing.lock().delay = delay;
            }
        }
    }

    fn host_state(&self, host: &str) -> Arc<HostState> {
        self.hosts
            .entry(host.to_string())
            .or_insert_with(|| {
                let over = self.overrides.get(host).copied().unwrap_or_default();
                Arc::new(HostState {
                    semaphore: Arc::new(Semaphore::new(
                        over.concurrent.unwrap_or(self.default_concurrent),
                    )),
                    pacing: Mutex::new(Pacing {
                        last_completed: None,
                        delay: over.delay.unwrap_or(self.default_delay),
                        success_count: 0,
                    }),
                })
            })
            .clone()
    }

    /// Acquire a rate-limit slot for `host`. Acquires the concurrency permit
    /// first, then sleeps for the remaining minimum delay outside the lock,
    /// then records the new completion timestamp under the lock.
    pub async fn limit(&self, host: &str) -> RateLimitSlot {
        let state = self.host_state(host);

        let permit = loop {
            match state.semaphore.clone().acquire_owned().await {
                Ok(permit) => break permit,
                Err(_) => {
                    log::error!("rate limiter semaphore for '{host}' was closed unexpectedly");
                    // Semaphores are never explicitly closed by this type; retry is defensive.
                    continue;
                }
            }
        };

        let wait = {
            let pacing = state.pacing.lock();
            match pacing.last_completed {
                Some(last) => pacing.delay.saturating_sub(last.elapsed()),
                None => Duration::ZERO,
            }
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        state.pacing.lock().last_completed = Some(Instant::now());

        RateLimitSlot { _permit: permit }
    }

    /// Record an HTTP 429 for `host`. Multiplies the delay by the backoff
    /// factor (or adopts `retry_after` directly if given), clamped to the
    /// configured maximum, and resets the success counter. No-op if this
    /// limiter is not adaptive.
    pub fn record_rate_limit(&self, host: &str, retry_after: Option<Duration>) {
        if !self.adaptive {
            return;
        }
        let state = self.host_state(host);
        let mut pacing = state.pacing.lock();
        pacing.delay = match retry_after {
            Some(explicit) => explicit.min(self.max_delay),
            None => {
                let scaled = pacing.delay.mul_f64(self.backoff_factor);
                scaled.min(self.max_delay)
            }
        };
        pacing.success_count = 0;
    }

    /// Record a successful response for `host`. Once `success_threshold`
    /// consecutive successes accumulate, divides the delay by the backoff
    /// factor (clamped to the configured floor) and resets the counter.
    /// No-op if this limiter is not adaptive.
    pub fn record_success(&self, host: &str) {
        if !self.adaptive {
            return;
        }
        let state = self.host_state(host);
        let mut pacing = state.pacing.lock();
        pacing.success_count += 1;
        if pacing.success_count >= self.success_threshold {
            let scaled = pacing.delay.div_f64(self.backoff_factor);
            pacing.delay = scaled.max(self.min_delay);
            pacing.success_count = 0;
        }
    }

    /// Current effective delay for `host`, for tests and diagnostics.
    pub fn current_delay(&self, host: &str) -> Duration {
        self.host_state(host).pacing.lock().delay
    }
}

impl Default for PerHostRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY, DEFAULT_CONCURRENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn enforces_minimum_delay_between_completions() {
        let limiter = PerHostRateLimiter::new(Duration::from_millis(50), 1);
        let start = Instant::now();
        {
            let _slot = limiter.limit("example.com").await;
        }
        {
            let _slot = limiter.limit("example.com").await;
        }
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn bounds_concurrency_per_host() {
        let limiter = Arc::new(PerHostRateLimiter::new(Duration::from_millis(0), 1));
        let slot = limiter.limit("example.com").await;
        let limiter2 = limiter.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            let _slot = limiter2.limit("example.com").await;
            start.elapsed()
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(slot);
        let waited = handle.await.unwrap();
        assert!(waited >= Duration::from_millis(15));
    }

    #[test]
    fn adaptive_backs_off_on_429_and_recovers_after_threshold() {
        let limiter = PerHostRateLimiter::new(Duration::from_millis(500), 3).adaptive();
        limiter.record_rate_limit("example.com", None);
        assert_eq!(limiter.current_delay("example.com"), Duration::from_millis(1000));

        limiter.record_rate_limit("example.com", Some(Duration::from_secs(5)));
        assert_eq!(limiter.current_delay("example.com"), Duration::from_secs(5));

        for _ in 0..DEFAULT_SUCCESS_THRESHOLD {
            limiter.record_success("example.com");
        }
        assert_eq!(limiter.current_delay("example.com"), Duration::from_secs(2));
    }

    #[test]
    fn non_adaptive_ignores_rate_limit_signals() {
        let limiter = PerHostRateLimiter::new(Duration::from_millis(500), 3);
        limiter.record_rate_limit("example.com", Some(Duration::from_secs(10)));
        assert_eq!(limiter.current_delay("example.com"), Duration::from_millis(500));
    }
}
