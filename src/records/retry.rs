// Request pacing and retry for live record sources.
//
// The public search endpoint throttles aggressive clients. Requests go
// through a minimum-interval limiter shared by every clone of the source,
// and rate-limited or transiently failing calls are retried with
// exponential backoff plus random jitter.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

/// Maximum number of retry attempts after the first call.
pub const MAX_RETRIES: u32 = 5;

/// Base delay for exponential backoff (doubles each retry).
const BASE_BACKOFF: Duration = Duration::from_secs(2);

/// Cap on any single backoff delay.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Enforces a minimum interval between consecutive requests.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<Option<Instant>>>,
    interval: Duration,
}

impl RateLimiter {
    /// Allow at most `requests_per_second` requests per second.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            inner: Arc::new(Mutex::new(None)),
            interval,
        }
    }

    /// Wait until the next request is allowed.
    pub async fn acquire(&self) {
        let mut last = self.inner.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                drop(last);
                tokio::time::sleep(wait).await;
                last = self.inner.lock().await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Whether an error looks like throttling or a transient server failure.
///
/// The HTTP client reports status codes inside the error message, so the
/// whole error chain is searched.
pub fn is_retryable(err: &anyhow::Error) -> bool {
    let text = format!("{err:?}").to_lowercase();
    text.contains("429")
        || text.contains("rate limit")
        || text.contains("ratelimit")
        || text.contains("502 bad gateway")
        || text.contains("503 service unavailable")
        || text.contains("504 gateway timeout")
}

/// Backoff delay before retry number `attempt` (1-based), with
/// +/- 25% jitter.
pub fn backoff_delay<R: Rng + ?Sized>(attempt: u32, rng: &mut R) -> Duration {
    let base = BASE_BACKOFF
        .saturating_mul(1u32 << attempt.min(16))
        .min(MAX_BACKOFF);
    let jitter: f64 = rng.random_range(0.75..=1.25);
    Duration::from_secs_f64(base.as_secs_f64() * jitter)
}

/// Run `operation`, retrying retryable failures up to `MAX_RETRIES` times.
///
/// The limiter is consulted before every attempt, retries included.
/// Non-retryable errors are returned immediately.
pub async fn with_retry<F, Fut, T>(limiter: &RateLimiter, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0u32;

    loop {
        limiter.acquire().await;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retryable(&err) || attempt >= MAX_RETRIES {
                    return Err(err);
                }
                attempt += 1;
                let delay = backoff_delay(attempt, &mut rand::rng());

                warn!(
                    attempt = attempt,
                    max_retries = MAX_RETRIES,
                    backoff_secs = delay.as_secs_f64(),
                    "Request throttled, retrying in {:.1}s",
                    delay.as_secs_f64(),
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_limiter_first_request_is_immediate() {
        let limiter = RateLimiter::new(1.0);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_limiter_spaces_requests() {
        let limiter = RateLimiter::new(2.0);
        limiter.acquire().await;
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(&anyhow::anyhow!("XRPC x returned 429 Too Many Requests")));
        assert!(is_retryable(&anyhow::anyhow!("Rate Limit exceeded")));
        assert!(is_retryable(&anyhow::anyhow!("returned 503 Service Unavailable: ")));
        assert!(!is_retryable(&anyhow::anyhow!("returned 400 Bad Request")));
        assert!(!is_retryable(&anyhow::anyhow!("connection refused")));
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let mut rng = StdRng::seed_from_u64(3);
        let first = backoff_delay(1, &mut rng);
        assert!(first >= Duration::from_secs(3) && first <= Duration::from_secs(5));
        let late = backoff_delay(10, &mut rng);
        assert!(late <= Duration::from_secs(75));
        assert!(late >= Duration::from_secs(45));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_recovers_from_throttling() {
        let limiter = RateLimiter::new(100.0);
        let calls = AtomicU32::new(0);

        let result = with_retry(&limiter, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(anyhow::anyhow!("HTTP 429"))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_gives_up_after_max() {
        let limiter = RateLimiter::new(100.0);
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_retry(&limiter, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(anyhow::anyhow!("429")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRIES + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_does_not_retry_other_errors() {
        let limiter = RateLimiter::new(100.0);
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_retry(&limiter, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(anyhow::anyhow!("invalid query")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
