//! SEO metadata extraction and analysis
//!
//! - `metadata`: the record extracted from one page
//! - `extractor`: HTML to metadata
//! - `analyzer`: length rules over a metadata record
//! - `checker`: fetch + extract + analyze for a URL

mod analyzer;
mod checker;
mod extractor;
mod metadata;

pub use analyzer::{
    analyze, AnalysisReport, FieldReport, HeadingReport, DESCRIPTION_MAX_LEN, DESCRIPTION_MIN_LEN,
    TITLE_MAX_LEN, TITLE_MIN_LEN,
};
pub use checker::SeoChecker;
pub use extractor::{extract_metadata, MetadataExtractor};
pub use metadata::SeoMetadata;
