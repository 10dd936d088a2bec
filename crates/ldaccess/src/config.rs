//! Resolver configuration.
//!
//! `ResolverConfig` is built once and handed to `AccessResolver::new`;
//! nothing downstream reads defaults of its own. `HttpFetcherConfig`
//! configures the bundled HTTP transport and can be loaded from the
//! environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ldaccess_model::DocumentFetcher;
use ldaccess_wac::DEFAULT_MAX_FALLBACK_DEPTH;

use crate::error::ConfigError;
#[cfg(feature = "http")]
use crate::error::ResolveResult;
#[cfg(feature = "http")]
use crate::http::{GraphParser, HttpFetcher};
use crate::retry::{RetryConfig, RetryingFetcher};

/// Configuration for an `AccessResolver`.
#[derive(Clone)]
pub struct ResolverConfig {
    /// Transport used for every metadata and document fetch.
    pub fetcher: Arc<dyn DocumentFetcher>,

    /// Upper bound on the ancestor Containers visited looking for a
    /// fallback ACL.
    pub max_fallback_depth: usize,
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("max_fallback_depth", &self.max_fallback_depth)
            .finish_non_exhaustive()
    }
}

impl ResolverConfig {
    /// Use `fetcher` as the transport.
    pub fn new<F>(fetcher: F) -> Self
    where
        F: DocumentFetcher + 'static,
    {
        Self::with_shared_fetcher(Arc::new(fetcher))
    }

    /// Use an already shared transport.
    pub fn with_shared_fetcher(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            fetcher,
            max_fallback_depth: DEFAULT_MAX_FALLBACK_DEPTH,
        }
    }

    /// Use `fetcher`, retrying transient failures per `retry`.
    pub fn with_retry<F>(fetcher: F, retry: RetryConfig) -> Self
    where
        F: DocumentFetcher + 'static,
    {
        Self::new(RetryingFetcher::new(fetcher, retry))
    }

    /// HTTP transport configured from the environment, retrying per
    /// `LDACCESS_MAX_RETRIES`.
    ///
    /// See [`HttpFetcherConfig::from_env`] for the variables read.
    #[cfg(feature = "http")]
    pub fn http_from_env(parser: Arc<dyn GraphParser>) -> ResolveResult<Self> {
        let http = HttpFetcherConfig::from_env()?;
        let retry = http.retry();
        let fetcher = HttpFetcher::new(http, parser)?;
        Ok(Self::with_retry(fetcher, retry))
    }

    /// Set the ancestor walk bound.
    pub fn max_fallback_depth(mut self, depth: usize) -> Self {
        self.max_fallback_depth = depth;
        self
    }
}

/// Configuration for the HTTP transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpFetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum attempts per request.
    pub max_retries: u32,

    /// `Accept` header sent with document requests.
    pub accept: String,

    /// Bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            accept: "text/turtle".to_string(),
            bearer_token: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl HttpFetcherConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LDACCESS_FETCH_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `LDACCESS_MAX_RETRIES`: Maximum attempts per request (default: 3)
    /// - `LDACCESS_ACCEPT`: `Accept` header for documents (default: text/turtle)
    /// - `LDACCESS_BEARER_TOKEN`: Bearer token for authenticated fetches
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        let config = Self {
            timeout_secs: parse_env("LDACCESS_FETCH_TIMEOUT_SECS", default.timeout_secs)?,
            max_retries: parse_env("LDACCESS_MAX_RETRIES", default.max_retries)?,
            accept: std::env::var("LDACCESS_ACCEPT").unwrap_or(default.accept),
            bearer_token: std::env::var("LDACCESS_BEARER_TOKEN").ok(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.accept.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "accept".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy matching `max_retries`.
    pub fn retry(&self) -> RetryConfig {
        RetryConfig::default().with_max_attempts(self.max_retries)
    }
}
