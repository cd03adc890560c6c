//! Retry orchestration over the strategy list
//!
//! Attempts are the outer loop and strategies the inner one: every attempt
//! gives each strategy one try, in order, before the next attempt begins. The
//! first non-empty content wins and nothing else runs after it.

use super::{FetchError, FetchResult, FetchedPage, Fetcher, SharedRng, Strategy};
use futures::FutureExt;
use rand::seq::SliceRandom;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::PoisonError;
use std::time::Duration;
use url::Url;

/// Randomised pause between strategy invocations
#[derive(Clone)]
pub struct Backoff {
    delays: Vec<Duration>,
    rng: SharedRng,
}

impl Backoff {
    pub fn new(delays: Vec<Duration>, rng: SharedRng) -> Self {
        Self { delays, rng }
    }

    /// Backoff that never pauses
    pub fn none(rng: SharedRng) -> Self {
        Self::new(vec![Duration::ZERO], rng)
    }

    /// Draws one delay uniformly from the configured set
    pub fn next_delay(&self) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.delays.choose(&mut *rng).copied().unwrap_or(Duration::ZERO)
    }

    async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!("Backing off for {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// Drives the ordered strategy list with bounded retries
pub struct RetryOrchestrator<F = Strategy> {
    strategies: Vec<F>,
    backoff: Backoff,
}

impl<F: Fetcher> RetryOrchestrator<F> {
    pub fn new(strategies: Vec<F>, backoff: Backoff) -> Self {
        Self {
            strategies,
            backoff,
        }
    }

    /// Fetches content for a URL, trying every strategy on every attempt
    ///
    /// # Arguments
    ///
    /// * `url` - The page to fetch
    /// * `max_retries` - Number of passes over the strategy list; 0 makes none
    ///
    /// # Returns
    ///
    /// * `Some(FetchedPage)` - The first non-empty content and its strategy
    /// * `None` - Every strategy failed on every attempt
    pub async fn get_page_content(&self, url: &Url, max_retries: u32) -> Option<FetchedPage> {
        let total_invocations = max_retries as usize * self.strategies.len();
        let mut invocations = 0;

        for attempt in 1..=max_retries {
            for strategy in &self.strategies {
                invocations += 1;
                tracing::info!(
                    "Attempting to fetch {} with {}, attempt {}",
                    url,
                    strategy.name(),
                    attempt
                );

                match invoke(strategy, url).await {
                    Ok(content) if !content.is_empty() => {
                        tracing::info!("Fetched {} with {}", url, strategy.name());
                        return Some(FetchedPage {
                            content,
                            strategy: strategy.name(),
                        });
                    }
                    Ok(_) => {
                        tracing::warn!("{} returned no content for {}", strategy.name(), url);
                    }
                    Err(e) => {
                        tracing::error!("{} attempt failed: {}", strategy.name(), e);
                    }
                }

                // Pause only between failed invocations, never after the last one
                if invocations < total_invocations {
                    self.backoff.pause().await;
                }
            }
        }

        tracing::error!("All attempts to fetch {} failed", url);
        None
    }
}

/// Runs one strategy invocation, turning a panic into a failure
async fn invoke<F: Fetcher>(strategy: &F, url: &Url) -> FetchResult<String> {
    AssertUnwindSafe(strategy.fetch(url))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(FetchError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
