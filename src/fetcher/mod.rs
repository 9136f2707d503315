pub mod config;
pub mod http_fetcher;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::app::Result;

pub use config::FetchConfig;
pub use http_fetcher::HttpFetcher;

/// A single GET attempt. Retrying is layered on top by [`RetryingFetcher`].
#[async_trait]
pub trait Fetcher {
    async fn get(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.backoff_base(),
        }
    }

    /// Delay after the failed attempt `attempt` (0-based): base * 2^attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Wraps a [`Fetcher`] with exponential backoff. Exhausted retries yield
/// `None` rather than an error so callers can skip the page and continue.
#[derive(Clone)]
pub struct RetryingFetcher {
    inner: Arc<dyn Fetcher + Send + Sync>,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    pub fn new(inner: Arc<dyn Fetcher + Send + Sync>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        for attempt in 0..self.policy.max_retries {
            match self.inner.get(url).await {
                Ok(body) => return Some(body),
                Err(e) => {
                    warn!("Attempt {} failed for {}: {}", attempt + 1, url, e);
                    if attempt + 1 < self.policy.max_retries {
                        tokio::time::sleep(self.policy.delay_for(attempt)).await;
                    }
                }
            }
        }
        None
    }
}
