//! Configuration module for SEO Checker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use seo_checker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seo-checker.toml")).unwrap();
//! println!("Retry ceiling: {}", config.fetch.max_retries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BrowserConfig, CaptchaConfig, Config, FetchConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
