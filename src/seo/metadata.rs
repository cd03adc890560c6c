use serde::{Deserialize, Serialize};

/// SEO-relevant metadata extracted from one page
///
/// `h1_tags` is always present, possibly empty, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(default)]
    pub h1_tags: Vec<String>,
    /// Which fetch strategy produced the HTML
    pub fetch_method: Option<String>,
}

impl SeoMetadata {
    /// Creates a record with no metadata found
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            meta_description: None,
            h1_tags: Vec::new(),
            fetch_method: None,
        }
    }

    /// Records the strategy that fetched the page
    pub fn with_fetch_method(mut self, method: impl Into<String>) -> Self {
        self.fetch_method = Some(method.into());
        self
    }
}
