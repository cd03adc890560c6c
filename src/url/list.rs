use crate::SeoError;
use std::path::Path;

/// Reads a URL list file: one URL per line, blank lines and `#` comments skipped
pub fn load_url_list(path: &Path) -> Result<Vec<String>, SeoError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&content))
}

/// Splits URL list text into entries
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
