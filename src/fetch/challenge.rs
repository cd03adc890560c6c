//! Detection of anti-bot interstitials the HTTP strategy can get past
//!
//! Recognised interstitials:
//! - `<meta http-equiv="refresh">` pages (cookie-setting JS challenges commonly
//!   finish with a refresh)
//! - script redirects through `location`, `location.href`, `location.replace()`
//!   or `location.assign()`
//! - reCAPTCHA gates carrying a `data-sitekey`
//!
//! A successful response is only treated as a challenge when it looks like an
//! interstitial (very little visible text), so that ordinary pages with an
//! embedded form CAPTCHA or a stray script redirect are returned as content.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

/// Visible body text below this many characters marks a page as interstitial
const INTERSTITIAL_TEXT_LIMIT: usize = 512;

static SCRIPT_REDIRECT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?:window\.|document\.|top\.)?location(?:\.href)?\s*=\s*["']([^"']+)["']|location\.(?:replace|assign)\(\s*["']([^"']+)["']\s*\)"#,
    )
    .ok()
});

/// An interstitial the HTTP strategy knows how to respond to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Challenge {
    /// Follow `target` after `delay`; an empty target reloads the current URL
    Redirect { target: String, delay: Duration },

    /// A reCAPTCHA gate that needs a solved token
    Recaptcha { site_key: String },
}

/// Inspects a response body for a challenge
///
/// # Arguments
///
/// * `html` - The response body
/// * `blocked` - Whether the response status was an error (403, 429, 503, ...)
///
/// # Returns
///
/// The challenge to answer, or None when the body should be treated as content
pub fn detect_challenge(html: &str, blocked: bool) -> Option<Challenge> {
    let document = Html::parse_document(html);

    if !blocked && !is_interstitial(&document) {
        return None;
    }

    if let Some(site_key) = find_site_key(&document) {
        return Some(Challenge::Recaptcha { site_key });
    }

    if let Some(challenge) = find_meta_refresh(&document) {
        return Some(challenge);
    }

    find_script_redirect(&document)
}

/// Whether the page carries almost no visible text
fn is_interstitial(document: &Html) -> bool {
    let Ok(body_selector) = Selector::parse("body") else {
        return false;
    };
    let Ok(script_selector) = Selector::parse("body script, body style, body noscript") else {
        return false;
    };

    let Some(body) = document.select(&body_selector).next() else {
        return true;
    };

    let total: usize = body.text().map(|t| t.trim().chars().count()).sum();
    let hidden: usize = body
        .select(&script_selector)
        .flat_map(|el| el.text())
        .map(|t| t.trim().chars().count())
        .sum();

    total.saturating_sub(hidden) < INTERSTITIAL_TEXT_LIMIT
}

fn find_site_key(document: &Html) -> Option<String> {
    let selector = Selector::parse("[data-sitekey]").ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("data-sitekey"))
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
}

fn find_meta_refresh(document: &Html) -> Option<Challenge> {
    let selector = Selector::parse("meta[http-equiv][content]").ok()?;

    let content = document
        .select(&selector)
        .find(|el| {
            el.value()
                .attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("refresh"))
        })?
        .value()
        .attr("content")?;

    Some(parse_refresh_content(content))
}

/// Parses `"<delay>[; url=<target>]"`
fn parse_refresh_content(content: &str) -> Challenge {
    let mut parts = content.splitn(2, [';', ',']);

    let delay = parts
        .next()
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| *d >= 0.0)
        .map(|d| Duration::try_from_secs_f64(d).unwrap_or(Duration::MAX))
        .unwrap_or(Duration::ZERO);

    let target = parts
        .next()
        .map(str::trim)
        .map(|rest| match (rest.get(..4), rest.get(4..)) {
            (Some(prefix), Some(target)) if prefix.eq_ignore_ascii_case("url=") => target,
            _ => rest,
        })
        .map(|t| t.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .unwrap_or_default();

    Challenge::Redirect { target, delay }
}

fn find_script_redirect(document: &Html) -> Option<Challenge> {
    let regex = SCRIPT_REDIRECT.as_ref()?;
    let selector = Selector::parse("script").ok()?;

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .find_map(|script| {
            let captures = regex.captures(&script)?;
            let target = captures.get(1).or_else(|| captures.get(2))?;
            Some(Challenge::Redirect {
                target: target.as_str().to_string(),
                delay: Duration::ZERO,
            })
        })
}
