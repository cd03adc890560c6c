//! Desktop browser user-agent strings and random rotation.

use super::SharedRng;
use rand::seq::SliceRandom;
use std::sync::PoisonError;

/// User agent the HTTP strategy presents: desktop Chrome on Windows
pub const CHROME_WINDOWS_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const DESKTOP_USER_AGENTS: &[&str] = &[
    CHROME_WINDOWS_USER_AGENT,
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.7; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
];

/// Rotating source of realistic user-agent strings
#[derive(Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
    rng: SharedRng,
}

impl UserAgentPool {
    /// Creates a pool over the built-in desktop user agents
    pub fn new(rng: SharedRng) -> Self {
        Self {
            agents: DESKTOP_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
            rng,
        }
    }

    /// Picks a user agent uniformly at random
    pub fn random(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.agents
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_else(|| CHROME_WINDOWS_USER_AGENT.to_string())
    }
}
