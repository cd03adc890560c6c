use crate::UrlError;
use url::Url;

/// Validates that a string is an absolute HTTP(S) URL with a host
///
/// The URL is requested exactly as given; no normalization beyond parsing.
///
/// # Examples
///
/// ```
/// use seo_checker::url::validate_url;
///
/// let url = validate_url("https://example.com/page").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert!(validate_url("mailto:someone@example.com").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}
