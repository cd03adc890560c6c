//! HTML parser for extracting SEO metadata
//!
//! Extracted fields:
//! - Title: trimmed text of the first `<title>`
//! - Meta description: trimmed `content` of `<meta name="description">`
//! - H1 headings: trimmed text of every `<h1>`, in document order

use super::metadata::SeoMetadata;
use crate::{ParseResult, ParsingError};
use scraper::{Html, Selector};

fn compile(selector: &str) -> ParseResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| ParsingError::new(format!("invalid selector '{}': {:?}", selector, e)))
}

/// Compiled selectors for metadata extraction
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    title: Selector,
    meta: Selector,
    h1: Selector,
}

impl MetadataExtractor {
    pub fn new() -> ParseResult<Self> {
        Ok(Self {
            title: compile("title")?,
            meta: compile("meta[name]")?,
            h1: compile("h1")?,
        })
    }

    /// Parses a page into a metadata record
    ///
    /// The result is all-or-nothing: a failure never yields a partial record.
    ///
    /// # Example
    ///
    /// ```
    /// use seo_checker::MetadataExtractor;
    ///
    /// let html = r#"<html><head><title> Home </title></head><body><h1>Hi</h1></body></html>"#;
    /// let metadata = MetadataExtractor::new().unwrap().extract("https://example.com/", html).unwrap();
    /// assert_eq!(metadata.title.as_deref(), Some("Home"));
    /// assert_eq!(metadata.h1_tags, vec!["Hi".to_string()]);
    /// ```
    pub fn extract(&self, url: &str, html: &str) -> ParseResult<SeoMetadata> {
        let document = Html::parse_document(html);

        Ok(SeoMetadata {
            url: url.to_string(),
            title: self.extract_title(&document),
            meta_description: self.extract_meta_description(&document),
            h1_tags: self.extract_h1_tags(&document),
            fetch_method: None,
        })
    }

    fn extract_title(&self, document: &Html) -> Option<String> {
        document
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
    }

    fn extract_meta_description(&self, document: &Html) -> Option<String> {
        document
            .select(&self.meta)
            .find(|element| {
                element
                    .value()
                    .attr("name")
                    .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
            })
            .and_then(|element| element.value().attr("content"))
            .map(|content| content.trim().to_string())
    }

    fn extract_h1_tags(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.h1)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }
}

/// Convenience function: compile selectors and extract in one call
pub fn extract_metadata(url: &str, html: &str) -> ParseResult<SeoMetadata> {
    MetadataExtractor::new()?.extract(url, html)
}
