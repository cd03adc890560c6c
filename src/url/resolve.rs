use url::Url;

/// Resolves a redirect target announced by a page against the page URL
///
/// Returns None for targets that must not be followed:
/// - empty or fragment-only targets
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that does not resolve to HTTP(S)
pub fn resolve_redirect(target: &str, base_url: &Url) -> Option<Url> {
    let target = target.trim().trim_matches(|c| c == '\'' || c == '"');

    if target.is_empty() || target.starts_with('#') {
        return None;
    }

    let lower = target.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    match base_url.join(target) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
