//! Headless Chrome fallback strategy
//!
//! Each fetch launches its own Chrome process on a blocking thread, navigates
//! with a randomly chosen user agent, waits a bounded time for the page body
//! and returns the rendered source. `Browser` kills its process on drop, so the
//! session is torn down on every return path, including the wait timeout.

use super::user_agent::UserAgentPool;
use super::{FetchError, FetchResult, Fetcher};
use crate::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Extra grace the browser process gets beyond the body wait before Chrome's
/// own idle watchdog shuts it down
const IDLE_GRACE: Duration = Duration::from_secs(30);

const STEALTH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--no-first-run",
    "--no-default-browser-check",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--mute-audio",
    "--window-size=1920,1080",
];

/// Headless browser rendering strategy
pub struct BrowserFetcher {
    wait_timeout: Duration,
    chrome_path: Option<PathBuf>,
    user_agents: UserAgentPool,
}

impl BrowserFetcher {
    pub fn new(config: &BrowserConfig, user_agents: UserAgentPool) -> Self {
        Self {
            wait_timeout: Duration::from_secs(config.wait_timeout),
            chrome_path: config.chrome_path.clone(),
            user_agents,
        }
    }
}

impl Fetcher for BrowserFetcher {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch(&self, url: &Url) -> FetchResult<String> {
        let session = RenderSession {
            url: url.to_string(),
            user_agent: self.user_agents.random(),
            wait_timeout: self.wait_timeout,
            chrome_path: self.chrome_path.clone(),
        };

        tokio::task::spawn_blocking(move || session.render())
            .await
            .map_err(|e| FetchError::Browser(format!("browser task failed: {}", e)))?
    }
}

/// Everything one blocking render needs, owned so it can move to the blocking pool
struct RenderSession {
    url: String,
    user_agent: String,
    wait_timeout: Duration,
    chrome_path: Option<PathBuf>,
}

impl RenderSession {
    fn render(self) -> FetchResult<String> {
        let user_agent_arg = format!("--user-agent={}", self.user_agent);
        let mut args: Vec<&OsStr> = STEALTH_ARGS.iter().map(OsStr::new).collect();
        args.push(OsStr::new(&user_agent_arg));

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(self.chrome_path.clone())
            .idle_browser_timeout(self.wait_timeout + IDLE_GRACE)
            .args(args)
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid launch options: {}", e)))?;

        let browser = Browser::new(options).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;

        tab.set_user_agent(&self.user_agent, None, None)
            .map_err(browser_error)?;
        tab.navigate_to(&self.url).map_err(browser_error)?;

        if let Err(e) = tab.wait_for_element_with_custom_timeout("body", self.wait_timeout) {
            tracing::warn!("Browser timeout waiting for page load of {}: {}", self.url, e);
            return Err(FetchError::BrowserTimeout {
                seconds: self.wait_timeout.as_secs(),
            });
        }

        let content = tab.get_content().map_err(browser_error)?;
        tracing::debug!("Browser rendered {} ({} bytes)", self.url, content.len());
        Ok(content)
    }
}

fn browser_error(error: anyhow::Error) -> FetchError {
    FetchError::Browser(error.to_string())
}
