//! Length rules for SEO metadata
//!
//! | Field | Missing | Too short | Too long |
//! |-------|---------|-----------|----------|
//! | Title | absent or empty | < 30 chars | > 60 chars |
//! | Meta description | absent or empty | < 120 chars | > 160 chars |
//! | H1 | zero tags | | more than one tag |
//!
//! At most one issue is reported per field; the first matching rule wins.

use super::metadata::SeoMetadata;
use serde::Serialize;

pub const TITLE_MIN_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 60;
pub const DESCRIPTION_MIN_LEN: usize = 120;
pub const DESCRIPTION_MAX_LEN: usize = 160;

/// Findings for a length-checked text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub present: bool,
    pub length: usize,
    pub issues: Vec<String>,
}

/// Findings for the H1 headings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingReport {
    pub count: usize,
    pub issues: Vec<String>,
}

/// Diagnostic report derived from one metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub title: FieldReport,
    pub meta_description: FieldReport,
    pub h1: HeadingReport,
}

impl AnalysisReport {
    /// All issues across fields, in title, description, H1 order
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.title
            .issues
            .iter()
            .chain(&self.meta_description.issues)
            .chain(&self.h1.issues)
            .map(String::as_str)
    }

    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }
}

/// Scores a metadata record against the length rules
pub fn analyze(metadata: &SeoMetadata) -> AnalysisReport {
    AnalysisReport {
        title: check_length(
            metadata.title.as_deref(),
            TITLE_MIN_LEN,
            TITLE_MAX_LEN,
            "Missing title tag",
            "Title",
        ),
        meta_description: check_length(
            metadata.meta_description.as_deref(),
            DESCRIPTION_MIN_LEN,
            DESCRIPTION_MAX_LEN,
            "Missing meta description",
            "Meta description",
        ),
        h1: check_headings(&metadata.h1_tags),
    }
}

fn check_length(
    value: Option<&str>,
    min: usize,
    max: usize,
    missing: &str,
    label: &str,
) -> FieldReport {
    let length = value.map(|v| v.chars().count()).unwrap_or(0);

    let issue = if length == 0 {
        Some(missing.to_string())
    } else if length < min {
        Some(format!("{} too short (< {} characters)", label, min))
    } else if length > max {
        Some(format!("{} too long (> {} characters)", label, max))
    } else {
        None
    };

    FieldReport {
        present: value.is_some(),
        length,
        issues: issue.into_iter().collect(),
    }
}

fn check_headings(h1_tags: &[String]) -> HeadingReport {
    let count = h1_tags.len();

    let issue = match count {
        0 => Some("Missing H1 tag"),
        1 => None,
        _ => Some("Multiple H1 tags found"),
    };

    HeadingReport {
        count,
        issues: issue.into_iter().map(str::to_string).collect(),
    }
}
