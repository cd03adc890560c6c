//! Top-level checker: fetch, extract and analyze a single URL

use super::analyzer::{analyze, AnalysisReport};
use super::extractor::MetadataExtractor;
use super::metadata::SeoMetadata;
use crate::config::Config;
use crate::fetch::{
    build_strategies, shared_rng, Backoff, FetchedPage, Fetcher, RetryOrchestrator, Strategy,
};
use crate::url::validate_url;
use crate::SeoError;

/// Fetches pages and turns them into metadata and reports
pub struct SeoChecker<F = Strategy> {
    orchestrator: RetryOrchestrator<F>,
    extractor: MetadataExtractor,
    max_retries: u32,
}

impl SeoChecker<Strategy> {
    /// Builds the checker with the configured strategies, backoff and retry ceiling
    pub fn from_config(config: &Config) -> Result<Self, SeoError> {
        let rng = shared_rng(config.fetch.seed);
        let strategies = build_strategies(config, &rng)?;
        let backoff = Backoff::new(config.fetch.backoff_durations(), rng);

        tracing::debug!(
            "Checker ready: {} strategies, {} retries",
            strategies.len(),
            config.fetch.max_retries
        );

        Self::new(
            RetryOrchestrator::new(strategies, backoff),
            config.fetch.max_retries,
        )
    }
}

impl<F: Fetcher> SeoChecker<F> {
    pub fn new(orchestrator: RetryOrchestrator<F>, max_retries: u32) -> Result<Self, SeoError> {
        Ok(Self {
            orchestrator,
            extractor: MetadataExtractor::new()?,
            max_retries,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Fetches raw HTML for a URL
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - Content and the strategy that produced it
    /// * `Err(SeoError::Url)` - The URL is not an absolute HTTP(S) URL
    /// * `Err(SeoError::UrlFetch)` - Every strategy failed on every attempt
    pub async fn fetch_url(&self, url: &str) -> Result<FetchedPage, SeoError> {
        let parsed = validate_url(url)?;

        self.orchestrator
            .get_page_content(&parsed, self.max_retries)
            .await
            .ok_or_else(|| SeoError::UrlFetch {
                url: url.to_string(),
            })
    }

    /// Fetches a URL and extracts its SEO metadata
    pub async fn extract_metadata(&self, url: &str) -> Result<SeoMetadata, SeoError> {
        let page = self.fetch_url(url).await?;

        let metadata = self.extractor.extract(url, &page.content).map_err(|e| {
            tracing::error!("Failed to parse HTML from {}: {}", url, e);
            e
        })?;

        Ok(metadata.with_fetch_method(page.strategy))
    }

    /// Scores metadata against the length rules
    pub fn analyze_metadata(&self, metadata: &SeoMetadata) -> AnalysisReport {
        analyze(metadata)
    }
}
