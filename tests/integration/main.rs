//! Integration tests for the SEO checker
//!
//! These tests use wiremock to create mock HTTP servers for target pages and
//! for the CAPTCHA-solving service.

mod checker_tests;
mod export_tests;
mod http_fetch_tests;

/// Page with a title, description and a single H1
pub const SAMPLE_PAGE: &str = r#"<html>
<head>
    <title>Test Title</title>
    <meta name="description" content="Test Description">
</head>
<body>
    <h1>Test H1</h1>
</body>
</html>"#;
