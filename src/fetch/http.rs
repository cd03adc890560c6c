//! Fast-path HTTP strategy
//!
//! This module handles the lightweight fetch path:
//! - Building a reqwest client that presents as desktop Chrome on Windows
//! - Keeping a cookie jar so challenge cookies survive the follow-up request
//! - Following refresh and script-redirect interstitials
//! - Submitting a solved reCAPTCHA token when a solver is configured

use super::captcha::CaptchaSolver;
use super::challenge::{detect_challenge, Challenge};
use super::user_agent::CHROME_WINDOWS_USER_AGENT;
use super::{FetchError, FetchResult, Fetcher};
use crate::config::HttpConfig;
use crate::url::resolve_redirect;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;
use url::Url;

/// Form field carrying a solved reCAPTCHA token
const RECAPTCHA_FIELD: &str = "g-recaptcha-response";

/// Headers a desktop Chrome sends on a top-level navigation
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static("?0"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static("\"Windows\""),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers
}

/// Builds the browser-mimicking HTTP client
///
/// # Arguments
///
/// * `config` - Timeouts for the client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(CHROME_WINDOWS_USER_AGENT)
        .default_headers(browser_headers())
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Lightweight HTTP strategy with anti-bot emulation
pub struct HttpFetcher {
    client: Client,
    max_challenge_hops: u32,
    challenge_delay_cap: Duration,
    captcha: Option<CaptchaSolver>,
}

impl HttpFetcher {
    /// Creates the strategy; `captcha` is the optional solving assist
    pub fn new(config: &HttpConfig, captcha: Option<CaptchaSolver>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            max_challenge_hops: config.max_challenge_hops,
            challenge_delay_cap: Duration::from_secs(config.challenge_delay_cap),
            captcha,
        })
    }

    /// Whether a CAPTCHA solver is wired in
    pub fn has_captcha_solver(&self) -> bool {
        self.captcha.is_some()
    }

    async fn get_page(&self, url: &Url) -> FetchResult<String> {
        let mut current = url.clone();
        let mut hops = 0;

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let (status, final_url, body) = read_response(response).await?;

            match detect_challenge(&body, !status.is_success()) {
                Some(Challenge::Redirect { target, delay }) => {
                    if hops >= self.max_challenge_hops {
                        return settle(
                            status,
                            body,
                            format!("still challenged after {} redirect hops", hops),
                        );
                    }

                    let next = if target.is_empty() {
                        final_url.clone()
                    } else {
                        match resolve_redirect(&target, &final_url) {
                            Some(next) => next,
                            None => {
                                return settle(
                                    status,
                                    body,
                                    format!("unfollowable challenge target '{}'", target),
                                );
                            }
                        }
                    };

                    let pause = delay.min(self.challenge_delay_cap);
                    tracing::debug!(
                        "Challenge redirect from {} to {} after {:?}",
                        final_url,
                        next,
                        pause
                    );
                    tokio::time::sleep(pause).await;

                    hops += 1;
                    current = next;
                }
                Some(Challenge::Recaptcha { site_key }) => {
                    return match self.submit_captcha(&final_url, &site_key).await {
                        Err(FetchError::ChallengeUnsolved(reason)) => settle(status, body, reason),
                        other => other,
                    };
                }
                None => return accept(status, body),
            }
        }
    }

    async fn submit_captcha(&self, url: &Url, site_key: &str) -> FetchResult<String> {
        let Some(solver) = &self.captcha else {
            return Err(FetchError::ChallengeUnsolved(
                "reCAPTCHA present and no solver configured".to_string(),
            ));
        };

        let Some(token) = solver.solve(url.as_str(), site_key).await else {
            return Err(FetchError::ChallengeUnsolved(
                "reCAPTCHA solver returned no token".to_string(),
            ));
        };

        tracing::info!("Submitting solved reCAPTCHA token to {}", url);

        let response = self
            .client
            .post(url.clone())
            .form(&[(RECAPTCHA_FIELD, token.as_str())])
            .send()
            .await?;
        let (status, _, body) = read_response(response).await?;

        if detect_challenge(&body, !status.is_success()).is_some() {
            return Err(FetchError::ChallengeUnsolved(
                "page still challenged after token submission".to_string(),
            ));
        }

        accept(status, body)
    }
}

async fn read_response(response: Response) -> FetchResult<(reqwest::StatusCode, Url, String)> {
    let status = response.status();
    let final_url = response.url().clone();
    let body = response.text().await?;
    Ok((status, final_url, body))
}

/// Falls back to a challenge-looking response that could not be answered
///
/// A 2xx body is still content; anything else fails with `reason`.
fn settle(status: reqwest::StatusCode, body: String, reason: String) -> FetchResult<String> {
    if status.is_success() {
        tracing::warn!("{}; keeping the {} response as content", reason, status);
        return accept(status, body);
    }

    Err(FetchError::ChallengeUnsolved(reason))
}

fn accept(status: reqwest::StatusCode, body: String) -> FetchResult<String> {
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(body)
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        self.get_page(url).await
    }
}
