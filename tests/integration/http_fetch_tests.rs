use crate::SAMPLE_PAGE;
use seo_checker::config::HttpConfig;
use seo_checker::fetch::{CaptchaSolver, FetchError, Fetcher, HttpFetcher};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(solver: Option<CaptchaSolver>) -> HttpFetcher {
    HttpFetcher::new(&HttpConfig::default(), solver).expect("Failed to build HTTP fetcher")
}

fn page_url(server: &MockServer, page: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), page)).expect("Failed to parse mock URL")
}

#[tokio::test]
async fn test_fetches_plain_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SAMPLE_PAGE)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher(None)
        .fetch(&page_url(&mock_server, "/"))
        .await
        .expect("Fetch failed");

    assert_eq!(body, SAMPLE_PAGE);
}

#[tokio::test]
async fn test_sends_browser_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("sec-ch-ua-platform", "\"Windows\""))
        .and(header("accept-language", "en-US,en;q=0.9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetcher(None).fetch(&page_url(&mock_server, "/")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_error_status_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html><body>Not found</body></html>"))
        .mount(&mock_server)
        .await;

    let result = fetcher(None).fetch(&page_url(&mock_server, "/missing")).await;
    assert!(matches!(result, Err(FetchError::Status { status: 404 })));
}

#[tokio::test]
async fn test_empty_body_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let result = fetcher(None).fetch(&page_url(&mock_server, "/")).await;
    assert!(matches!(result, Err(FetchError::EmptyBody)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_failure() {
    // Bind and immediately release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();

    let result = fetcher(None).fetch(&url).await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn test_follows_refresh_challenge_with_cookie() {
    let mock_server = MockServer::start().await;

    // Interstitial sets a clearance cookie and refreshes to the real page
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("set-cookie", "clearance=ok; Path=/")
                .set_body_string(
                    r#"<html><head><meta http-equiv="refresh" content="0; url=/article"></head><body>Checking your browser...</body></html>"#,
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("cookie", "clearance=ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher(None)
        .fetch(&page_url(&mock_server, "/"))
        .await
        .expect("Challenge was not followed");

    assert_eq!(body, SAMPLE_PAGE);
}

#[tokio::test]
async fn test_follows_script_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><script>window.location.href = "/landing";</script></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher(None)
        .fetch(&page_url(&mock_server, "/"))
        .await
        .expect("Script redirect was not followed");

    assert_eq!(body, SAMPLE_PAGE);
}

#[tokio::test]
async fn test_endless_challenge_gives_up() {
    let mock_server = MockServer::start().await;

    // Default config allows 3 hops: the initial request plus 3 follow-ups
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503).set_body_string(
            r#"<html><head><meta http-equiv="refresh" content="0"></head><body></body></html>"#,
        ))
        .expect(4)
        .mount(&mock_server)
        .await;

    let result = fetcher(None).fetch(&page_url(&mock_server, "/")).await;
    assert!(matches!(result, Err(FetchError::ChallengeUnsolved(_))));
}

#[tokio::test]
async fn test_self_refreshing_success_page_is_kept() {
    let mock_server = MockServer::start().await;
    let status_board = r#"<html><head><title>Status board</title><meta http-equiv="refresh" content="0"></head><body><h1>All systems up</h1></body></html>"#;

    // Refreshed until the hop limit, then the 2xx body is returned as content
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(status_board))
        .expect(4)
        .mount(&mock_server)
        .await;

    let body = fetcher(None)
        .fetch(&page_url(&mock_server, "/status"))
        .await
        .expect("2xx page should be kept");

    assert_eq!(body, status_board);
}

#[tokio::test]
async fn test_success_page_with_recaptcha_and_no_solver_is_kept() {
    let mock_server = MockServer::start().await;
    let contact_page = r#"<html><head><title>Contact</title></head><body><h1>Contact us</h1><form><div class="g-recaptcha" data-sitekey="contact-form"></div></form></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string(contact_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher(None)
        .fetch(&page_url(&mock_server, "/contact"))
        .await
        .expect("2xx page should be kept");

    assert_eq!(body, contact_page);
}

#[tokio::test]
async fn test_recaptcha_without_solver_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"<html><body><div class="g-recaptcha" data-sitekey="site-key"></div></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let result = fetcher(None).fetch(&page_url(&mock_server, "/")).await;
    assert!(matches!(result, Err(FetchError::ChallengeUnsolved(_))));
}

#[tokio::test]
async fn test_recaptcha_token_is_submitted() {
    let site = MockServer::start().await;
    let captcha_service = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"<html><body><form method="post"><div class="g-recaptcha" data-sitekey="site-key"></div></form></body></html>"#,
        ))
        .mount(&site)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("g-recaptcha-response=tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_PAGE))
        .expect(1)
        .mount(&site)
        .await;

    Mock::given(method("POST"))
        .and(path("/createTask"))
        .and(body_string_contains("site-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errorId": 0,
            "taskId": 7
        })))
        .expect(1)
        .mount(&captcha_service)
        .await;

    Mock::given(method("POST"))
        .and(path("/getTaskResult"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errorId": 0,
            "status": "ready",
            "solution": { "gRecaptchaResponse": "tok-123" }
        })))
        .mount(&captcha_service)
        .await;

    let solver = CaptchaSolver::new(
        "test-key",
        captcha_service.uri(),
        Duration::from_millis(10),
        Duration::from_secs(2),
    )
    .expect("Failed to build solver");

    let body = fetcher(Some(solver))
        .fetch(&page_url(&site, "/"))
        .await
        .expect("Token submission failed");

    assert_eq!(body, SAMPLE_PAGE);
}
