//! SEO Checker: fetch a page, extract its SEO metadata and score it
//!
//! This crate fetches web pages through a retrying, multi-strategy pipeline
//! (a browser-mimicking HTTP client first, headless Chrome as a fallback),
//! extracts the title, meta description and H1 headings, and checks them
//! against fixed length rules.

pub mod config;
pub mod fetch;
pub mod output;
pub mod seo;
pub mod url;

use thiserror::Error;

/// Main error type for SEO Checker operations
#[derive(Debug, Error)]
pub enum SeoError {
    #[error("Failed to fetch URL: {url}")]
    UrlFetch { url: String },

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised when fetched HTML cannot be turned into metadata
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse HTML: {message}")]
pub struct ParsingError {
    /// Description of the underlying cause
    pub message: String,
}

impl ParsingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for SEO Checker operations
pub type Result<T> = std::result::Result<T, SeoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for HTML parsing
pub type ParseResult<T> = std::result::Result<T, ParsingError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{FetchedPage, RetryOrchestrator, Strategy};
pub use seo::{analyze, AnalysisReport, MetadataExtractor, SeoChecker, SeoMetadata};
