use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of attempts over the strategy list
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff delays in seconds
pub const DEFAULT_BACKOFF_DELAYS: [u64; 5] = [1, 2, 3, 5, 8];

/// Default anti-captcha API endpoint
pub const DEFAULT_CAPTCHA_SERVICE_URL: &str = "https://api.anti-captcha.com";

/// Main configuration structure for SEO Checker
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub http: HttpConfig,
    pub browser: BrowserConfig,
    pub captcha: CaptchaConfig,
    pub output: OutputConfig,
}

/// Retry loop configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Number of passes over the strategy list
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Candidate pauses between strategy invocations (seconds)
    #[serde(rename = "backoff-delays")]
    pub backoff_delays: Vec<u64>,

    /// Seed for user-agent and delay selection; entropy when absent
    pub seed: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_delays: DEFAULT_BACKOFF_DELAYS.to_vec(),
            seed: None,
        }
    }
}

impl FetchConfig {
    pub fn backoff_durations(&self) -> Vec<Duration> {
        self.backoff_delays
            .iter()
            .map(|secs| Duration::from_secs(*secs))
            .collect()
    }
}

/// Fast-path HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout (seconds)
    pub timeout: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Maximum refresh/script redirects followed per fetch
    #[serde(rename = "max-challenge-hops")]
    pub max_challenge_hops: u32,

    /// Upper bound on the delay a challenge page may ask for (seconds)
    #[serde(rename = "challenge-delay-cap")]
    pub challenge_delay_cap: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            connect_timeout: 10,
            max_challenge_hops: 3,
            challenge_delay_cap: 5,
        }
    }
}

/// Headless browser fallback configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Whether the browser strategy runs after the HTTP strategy
    pub enabled: bool,

    /// How long to wait for the page body to appear (seconds)
    #[serde(rename = "wait-timeout")]
    pub wait_timeout: u64,

    /// Explicit Chrome/Chromium binary; auto-detected when absent
    #[serde(rename = "chrome-path")]
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            wait_timeout: 10,
            chrome_path: None,
        }
    }
}

/// CAPTCHA-solving service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Solving service credential; the assist is disabled without it
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// Base URL of the anti-captcha compatible API
    #[serde(rename = "service-url")]
    pub service_url: String,

    /// Pause between result polls (seconds)
    #[serde(rename = "poll-interval")]
    pub poll_interval: u64,

    /// Ceiling on the total time spent waiting for a token (seconds)
    #[serde(rename = "max-wait")]
    pub max_wait: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            service_url: DEFAULT_CAPTCHA_SERVICE_URL.to_string(),
            poll_interval: 3,
            max_wait: 60,
        }
    }
}

/// Export destinations
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(rename = "csv-path")]
    pub csv_path: Option<PathBuf>,

    #[serde(rename = "json-path")]
    pub json_path: Option<PathBuf>,
}
