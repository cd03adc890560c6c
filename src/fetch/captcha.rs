//! CAPTCHA-solving assist backed by an anti-captcha compatible JSON API
//!
//! Flow: `createTask` with a proxyless reCAPTCHA v2 task, then poll
//! `getTaskResult` until the task is `ready` or the wait ceiling passes.
//! Every failure is logged and reported as "no token".

use crate::config::CaptchaConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

const TASK_TYPE: &str = "RecaptchaV2TaskProxyless";

/// Errors from the solving service
#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("solving service error {code}: {description}")]
    Service { code: String, description: String },

    #[error("solving service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no solution within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("solving service response carried no token")]
    MissingSolution,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskRequest<'a> {
    client_key: &'a str,
    task: RecaptchaTask<'a>,
}

#[derive(Serialize)]
struct RecaptchaTask<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "websiteURL")]
    website_url: &'a str,
    #[serde(rename = "websiteKey")]
    website_key: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskResultRequest<'a> {
    client_key: &'a str,
    task_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTaskResponse {
    error_id: i64,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    task_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResultResponse {
    error_id: i64,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    solution: Option<Solution>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Solution {
    #[serde(default)]
    g_recaptcha_response: Option<String>,
}

fn service_error(code: Option<String>, description: Option<String>) -> CaptchaError {
    CaptchaError::Service {
        code: code.unwrap_or_else(|| "UNKNOWN".to_string()),
        description: description.unwrap_or_default(),
    }
}

/// Client for the external CAPTCHA-solving service
pub struct CaptchaSolver {
    client: Client,
    api_key: String,
    service_url: String,
    poll_interval: Duration,
    max_wait: Duration,
}

impl CaptchaSolver {
    pub fn new(
        api_key: impl Into<String>,
        service_url: impl Into<String>,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            service_url: service_url.into().trim_end_matches('/').to_string(),
            poll_interval,
            max_wait,
        })
    }

    /// Builds a solver when a credential is configured
    ///
    /// A missing credential is not an error: the assist is simply absent.
    pub fn from_config(config: &CaptchaConfig) -> Result<Option<Self>, reqwest::Error> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            tracing::debug!("No anti-captcha key configured, CAPTCHA assist disabled");
            return Ok(None);
        };

        Self::new(
            api_key,
            config.service_url.as_str(),
            Duration::from_secs(config.poll_interval),
            Duration::from_secs(config.max_wait),
        )
        .map(Some)
    }

    /// Solves a reCAPTCHA, returning the token or nothing
    pub async fn solve(&self, page_url: &str, site_key: &str) -> Option<String> {
        match self.request_token(page_url, site_key).await {
            Ok(token) => {
                tracing::info!("CAPTCHA solved for {}", page_url);
                Some(token)
            }
            Err(e) => {
                tracing::error!("Captcha solving failed: {}", e);
                None
            }
        }
    }

    /// Submits a task and polls until a token arrives or the ceiling passes
    pub async fn request_token(&self, page_url: &str, site_key: &str) -> Result<String, CaptchaError> {
        let task_id = self.create_task(page_url, site_key).await?;
        tracing::debug!("Created CAPTCHA task {} for {}", task_id, page_url);

        let deadline = Instant::now() + self.max_wait;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            tokio::time::sleep(self.poll_interval.min(remaining)).await;

            if Instant::now() >= deadline {
                return Err(self.timeout());
            }

            // A slow status request must not carry the wait past the ceiling
            match tokio::time::timeout_at(deadline, self.poll_task(task_id)).await {
                Ok(Ok(Some(token))) => return Ok(token),
                Ok(Ok(None)) => {
                    tracing::debug!("CAPTCHA task {} still processing", task_id);
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => return Err(self.timeout()),
            }
        }
    }

    fn timeout(&self) -> CaptchaError {
        CaptchaError::Timeout {
            seconds: self.max_wait.as_secs(),
        }
    }

    async fn create_task(&self, page_url: &str, site_key: &str) -> Result<u64, CaptchaError> {
        let request = CreateTaskRequest {
            client_key: &self.api_key,
            task: RecaptchaTask {
                kind: TASK_TYPE,
                website_url: page_url,
                website_key: site_key,
            },
        };

        let response: CreateTaskResponse = self
            .client
            .post(format!("{}/createTask", self.service_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.error_id != 0 {
            return Err(service_error(response.error_code, response.error_description));
        }

        response.task_id.ok_or_else(|| CaptchaError::Service {
            code: "NO_TASK_ID".to_string(),
            description: "createTask returned no taskId".to_string(),
        })
    }

    /// Returns the token when the task is ready, None while still processing
    async fn poll_task(&self, task_id: u64) -> Result<Option<String>, CaptchaError> {
        let request = TaskResultRequest {
            client_key: &self.api_key,
            task_id,
        };

        let response: TaskResultResponse = self
            .client
            .post(format!("{}/getTaskResult", self.service_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.error_id != 0 {
            return Err(service_error(response.error_code, response.error_description));
        }

        if response.status.as_deref() != Some("ready") {
            return Ok(None);
        }

        response
            .solution
            .and_then(|s| s.g_recaptcha_response)
            .filter(|token| !token.is_empty())
            .map(Some)
            .ok_or(CaptchaError::MissingSolution)
    }
}
