//! Page retrieval pipeline
//!
//! This module contains everything needed to get HTML for a URL:
//! - The fast-path HTTP strategy with browser header and challenge emulation
//! - The headless Chrome fallback strategy
//! - The optional CAPTCHA-solving assist
//! - The retry orchestrator that sequences strategies with backoff

mod browser;
mod captcha;
mod challenge;
mod http;
mod orchestrator;
mod user_agent;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::BrowserFetcher;
pub use captcha::{CaptchaError, CaptchaSolver};
pub use challenge::{detect_challenge, Challenge};
pub use http::{build_http_client, HttpFetcher};
pub use orchestrator::{Backoff, RetryOrchestrator};
pub use user_agent::{UserAgentPool, CHROME_WINDOWS_USER_AGENT};

use crate::config::Config;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use url::Url;

/// Random source shared by user-agent rotation and backoff selection
pub type SharedRng = Arc<Mutex<StdRng>>;

/// Creates the shared random source, seeded when reproducibility is wanted
pub fn shared_rng(seed: Option<u64>) -> SharedRng {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Arc::new(Mutex::new(rng))
}

/// Why a single strategy invocation produced no content
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("empty response body")]
    EmptyBody,

    #[error("challenge not solved: {0}")]
    ChallengeUnsolved(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("browser timed out after {seconds}s waiting for page body")]
    BrowserTimeout { seconds: u64 },

    #[error("strategy panicked: {0}")]
    Panicked(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Network("request timeout".to_string())
        } else if error.is_connect() {
            FetchError::Network("connection refused".to_string())
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

/// Result type alias for a single strategy invocation
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Content obtained by the orchestrator and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub content: String,
    pub strategy: &'static str,
}

/// One technique for retrieving a URL's HTML
pub trait Fetcher {
    /// Short identifier used in logs and recorded as the fetch method
    fn name(&self) -> &'static str;

    /// Attempts to retrieve HTML for the URL
    fn fetch(&self, url: &Url) -> impl Future<Output = FetchResult<String>> + Send;
}

/// The closed set of strategies the checker knows about
pub enum Strategy {
    Http(HttpFetcher),
    Browser(BrowserFetcher),
}

impl Fetcher for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Http(fetcher) => fetcher.name(),
            Strategy::Browser(fetcher) => fetcher.name(),
        }
    }

    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        match self {
            Strategy::Http(fetcher) => fetcher.fetch(url).await,
            Strategy::Browser(fetcher) => fetcher.fetch(url).await,
        }
    }
}

/// Builds the ordered strategy list: HTTP first, browser second when enabled
pub fn build_strategies(config: &Config, rng: &SharedRng) -> Result<Vec<Strategy>, reqwest::Error> {
    let captcha = CaptchaSolver::from_config(&config.captcha)?;

    let http = HttpFetcher::new(&config.http, captcha)?;
    tracing::debug!(
        "HTTP strategy ready, CAPTCHA assist {}",
        if http.has_captcha_solver() { "enabled" } else { "disabled" }
    );

    let mut strategies = vec![Strategy::Http(http)];

    if config.browser.enabled {
        strategies.push(Strategy::Browser(BrowserFetcher::new(
            &config.browser,
            UserAgentPool::new(Arc::clone(rng)),
        )));
    } else {
        tracing::debug!("Browser strategy disabled by configuration");
    }

    Ok(strategies)
}
