//! Output module for exporting and reporting check results
//!
//! This module handles:
//! - Exporting metadata records to CSV and JSON
//! - Printing per-URL analysis reports and a run summary

mod csv_output;
mod json_output;
pub mod report;

pub use csv_output::{export_to_csv, write_csv};
pub use json_output::{export_to_json, write_json};
pub use report::{print_report, print_summary, RunSummary};
