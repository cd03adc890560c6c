//! Console rendering of analysis results

use crate::seo::{AnalysisReport, FieldReport, SeoMetadata};

/// Counters for one checker run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// URLs requested
    pub checked: usize,

    /// URLs whose fetch was exhausted or whose HTML could not be parsed
    pub failed: usize,

    /// URLs analysed with no issues
    pub clean: usize,

    /// Issues across all analysed URLs
    pub total_issues: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, report: &AnalysisReport) {
        self.checked += 1;
        self.total_issues += report.issue_count();
        if report.is_clean() {
            self.clean += 1;
        }
    }

    pub fn record_failure(&mut self) {
        self.checked += 1;
        self.failed += 1;
    }

    pub fn succeeded(&self) -> usize {
        self.checked - self.failed
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.checked == 0 {
            return 0.0;
        }
        (self.succeeded() as f64 / self.checked as f64) * 100.0
    }
}

/// Renders one URL's report as text
pub fn format_report(metadata: &SeoMetadata, report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", metadata.url));
    if let Some(method) = &metadata.fetch_method {
        out.push_str(&format!("  Fetched with: {}\n", method));
    }

    push_field(&mut out, "Title", &report.title);
    push_field(&mut out, "Meta description", &report.meta_description);

    out.push_str(&format!("  H1 tags: {}\n", report.h1.count));
    for issue in &report.h1.issues {
        out.push_str(&format!("    - {}\n", issue));
    }

    if report.is_clean() {
        out.push_str("  ✓ No issues found\n");
    }

    out
}

fn push_field(out: &mut String, label: &str, field: &FieldReport) {
    if field.present {
        out.push_str(&format!("  {}: present ({} characters)\n", label, field.length));
    } else {
        out.push_str(&format!("  {}: absent\n", label));
    }
    for issue in &field.issues {
        out.push_str(&format!("    - {}\n", issue));
    }
}

/// Prints one URL's report to stdout
pub fn print_report(metadata: &SeoMetadata, report: &AnalysisReport) {
    println!("{}", format_report(metadata, report));
}

/// Prints run totals to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Summary ===\n");
    println!("  URLs checked: {}", summary.checked);
    println!("  Failed: {}", summary.failed);
    println!("  Without issues: {}", summary.clean);
    println!("  Total issues: {}", summary.total_issues);
    println!(
        "\nSuccess Rate: {:.1}% ({} / {} URLs analysed)",
        summary.success_rate(),
        summary.succeeded(),
        summary.checked
    );
}
