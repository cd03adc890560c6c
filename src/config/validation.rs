use crate::config::types::{BrowserConfig, CaptchaConfig, Config, FetchConfig, HttpConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_http_config(&config.http)?;
    validate_browser_config(&config.browser)?;
    validate_captcha_config(&config.captcha)?;
    Ok(())
}

/// Validates retry loop configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    // max_retries == 0 is allowed: the loop simply makes no attempts

    if config.backoff_delays.is_empty() {
        return Err(ConfigError::Validation(
            "backoff_delays must contain at least one value".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "http timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "http connect_timeout must be >= 1s, got {}s",
            config.connect_timeout
        )));
    }

    Ok(())
}

/// Validates headless browser configuration
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.wait_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "browser wait_timeout must be >= 1s, got {}s",
            config.wait_timeout
        )));
    }

    Ok(())
}

/// Validates CAPTCHA service configuration
fn validate_captcha_config(config: &CaptchaConfig) -> Result<(), ConfigError> {
    if let Some(key) = &config.api_key {
        if key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "captcha api_key cannot be empty when set".to_string(),
            ));
        }
    }

    let url = Url::parse(&config.service_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid captcha service_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "captcha service_url must use HTTP(S), got '{}'",
            config.service_url
        )));
    }

    if config.poll_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "captcha poll_interval must be >= 1s, got {}s",
            config.poll_interval
        )));
    }

    if config.poll_interval >= config.max_wait {
        return Err(ConfigError::Validation(format!(
            "captcha poll_interval ({}s) must be shorter than max_wait ({}s)",
            config.poll_interval, config.max_wait
        )));
    }

    Ok(())
}
