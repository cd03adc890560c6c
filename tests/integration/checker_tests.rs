use crate::SAMPLE_PAGE;
use seo_checker::config::Config;
use seo_checker::fetch::{shared_rng, Backoff, FetchError, FetchResult, Fetcher, RetryOrchestrator};
use seo_checker::{SeoChecker, SeoError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// HTTP-only checker with instant backoff
fn http_only_config(max_retries: u32) -> Config {
    let mut config = Config::default();
    config.browser.enabled = false;
    config.fetch.max_retries = max_retries;
    config.fetch.backoff_delays = vec![0];
    config.fetch.seed = Some(7);
    config
}

/// Strategy that fails a fixed number of times before returning content
struct CountingFetcher {
    name: &'static str,
    failures_before_success: Option<usize>,
    calls: Arc<AtomicUsize>,
}

impl Fetcher for CountingFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _url: &Url) -> FetchResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures_before_success {
            Some(n) if call >= n => Ok(SAMPLE_PAGE.to_string()),
            _ => Err(FetchError::Status { status: 503 }),
        }
    }
}

fn counting(name: &'static str, failures_before_success: Option<usize>) -> (CountingFetcher, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = CountingFetcher {
        name,
        failures_before_success,
        calls: Arc::clone(&calls),
    };
    (fetcher, calls)
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let checker = SeoChecker::from_config(&http_only_config(3)).expect("Failed to build checker");
    let url = format!("{}/page", mock_server.uri());

    let metadata = checker.extract_metadata(&url).await.expect("Extraction failed");

    assert_eq!(metadata.url, url);
    assert_eq!(metadata.title.as_deref(), Some("Test Title"));
    assert_eq!(metadata.meta_description.as_deref(), Some("Test Description"));
    assert_eq!(metadata.h1_tags, vec!["Test H1".to_string()]);
    assert_eq!(metadata.fetch_method.as_deref(), Some("http"));

    let report = checker.analyze_metadata(&metadata);
    let issues: Vec<_> = report.issues().collect();
    assert_eq!(
        issues,
        vec![
            "Title too short (< 30 characters)",
            "Meta description too short (< 120 characters)",
        ]
    );
    assert_eq!(report.h1.count, 1);
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let mock_server = MockServer::start().await;

    // One request per attempt with a single strategy
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html><body>oops</body></html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let checker = SeoChecker::from_config(&http_only_config(2)).expect("Failed to build checker");
    let url = format!("{}/", mock_server.uri());

    let result = checker.extract_metadata(&url).await;
    match result {
        Err(SeoError::UrlFetch { url: failed }) => assert_eq!(failed, url),
        other => panic!("Expected UrlFetch error, got {:?}", other.map(|m| m.url)),
    }
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_fetching() {
    let checker = SeoChecker::from_config(&http_only_config(1)).expect("Failed to build checker");

    let result = checker.extract_metadata("not a url").await;
    assert!(matches!(result, Err(SeoError::Url(_))));
}

#[tokio::test]
async fn test_fallback_strategy_records_its_name() {
    let (primary, primary_calls) = counting("primary", None);
    let (fallback, fallback_calls) = counting("fallback", Some(0));

    let orchestrator = RetryOrchestrator::new(
        vec![primary, fallback],
        Backoff::none(shared_rng(Some(1))),
    );
    let checker = SeoChecker::new(orchestrator, 3).expect("Failed to build checker");

    let metadata = checker
        .extract_metadata("https://example.com/")
        .await
        .expect("Fallback should succeed");

    assert_eq!(metadata.fetch_method.as_deref(), Some("fallback"));
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_later_attempt_succeeds_after_failures() {
    let (flaky, calls) = counting("flaky", Some(2));

    let orchestrator = RetryOrchestrator::new(vec![flaky], Backoff::none(shared_rng(Some(1))));
    let checker = SeoChecker::new(orchestrator, 3).expect("Failed to build checker");

    let page = checker
        .fetch_url("https://example.com/")
        .await
        .expect("Third attempt should succeed");

    assert_eq!(page.strategy, "flaky");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_zero_retries_never_fetches() {
    let (fetcher, calls) = counting("never", Some(0));

    let orchestrator = RetryOrchestrator::new(vec![fetcher], Backoff::none(shared_rng(Some(1))));
    let checker = SeoChecker::new(orchestrator, 0).expect("Failed to build checker");

    let result = checker.fetch_url("https://example.com/").await;
    assert!(matches!(result, Err(SeoError::UrlFetch { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
