//! Retrying transport.
//!
//! Control documents are small and fetched often; transient failures
//! (connection resets, 5xx, 429) are retried, everything else is returned
//! immediately so that "not found" and "forbidden" keep their meaning.
//!
//! # Example
//!
//! ```rust,no_run
//! use ldaccess::retry::{RetryConfig, RetryingFetcher};
//! use ldaccess_model::MemoryFetcher;
//!
//! let fetcher = RetryingFetcher::new(MemoryFetcher::new(), RetryConfig::default().with_max_attempts(5));
//! ```

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use ldaccess_model::{DocumentFetcher, FetchResult, Graph, ResourceInfo};

/// How often a fetch is attempted and how long to wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts per fetch, including the first.
    pub max_attempts: u32,

    /// Wait before the first retry.
    pub initial_delay: Duration,

    /// Cap on the wait between attempts.
    pub max_delay: Duration,

    /// Growth factor of the wait after each retry.
    pub exponential_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            exponential_base: 2.0,
        }
    }
}

impl RetryConfig {
    /// A single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            exponential_base: 1.0,
        }
    }

    /// Same backoff with a different number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Wait before retry number `retry`, counting from 1.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.exponential_base.powi(retry.saturating_sub(1) as i32);
        let secs = self.initial_delay.as_secs_f64() * factor;
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }
}

/// Run `fetch` until it succeeds, fails for good, or attempts run out.
async fn fetch_with_retry<T, F, Fut>(config: &RetryConfig, url: &str, mut fetch: F) -> FetchResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    let mut attempt = 1;
    loop {
        let err = match fetch().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(url = %url, attempts = attempt, "Fetch recovered");
                }
                return Ok(value);
            }
            Err(err) => err,
        };
        if !err.is_retryable() || attempt >= config.max_attempts {
            if attempt > 1 {
                warn!(url = %url, attempts = attempt, error = %err, "Giving up on fetch");
            }
            return Err(err);
        }

        let wait = config.backoff(attempt);
        warn!(
            url = %url,
            attempt,
            wait_ms = wait.as_millis() as u64,
            error = %err,
            "Transient fetch failure"
        );
        sleep(wait).await;
        attempt += 1;
    }
}

/// A `DocumentFetcher` that retries transient failures of another one.
#[derive(Debug, Clone)]
pub struct RetryingFetcher<F> {
    inner: F,
    config: RetryConfig,
}

impl<F> RetryingFetcher<F> {
    /// Wrap `inner`.
    pub fn new(inner: F, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F> DocumentFetcher for RetryingFetcher<F>
where
    F: DocumentFetcher,
{
    async fn fetch_resource_info(&self, url: &str) -> FetchResult<ResourceInfo> {
        fetch_with_retry(&self.config, url, || self.inner.fetch_resource_info(url)).await
    }

    async fn fetch_document(&self, url: &str) -> FetchResult<Graph> {
        fetch_with_retry(&self.config, url, || self.inner.fetch_document(url)).await
    }
}
